//! Recursive tree builder: tokens to [`SyntaxNode`].

use brex_lexer::{LexResult, Lexer, Token};
use brex_types::{BrexError, EngineConfig, Literal, Result, Span, SyntaxNode};
use tracing::trace;

/// The brex tree builder.
///
/// Turns an expression string into a [`SyntaxNode`], descending into each
/// bracketed parameter list. Nesting is bounded by
/// [`EngineConfig::depth_limit`].
pub struct Parser<'src> {
    /// The full expression.
    source: &'src str,
    config: EngineConfig,
}

impl<'src> Parser<'src> {
    /// Create a parser with the default configuration.
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    pub fn with_config(source: &'src str, config: EngineConfig) -> Self {
        Self { source, config }
    }

    /// Build the syntax tree for the whole expression.
    pub fn parse(&self) -> Result<SyntaxNode> {
        trace!(input = self.source, "building syntax tree");
        let tokens = self.lex(self.source, 0)?;
        self.build_tokens(&tokens, 1)
    }

    /// Build a tree from an already-lexed top-level token list.
    pub fn parse_tokens(&self, tokens: &[Token]) -> Result<SyntaxNode> {
        self.build_tokens(tokens, 1)
    }

    // ── Lexing ───────────────────────────────────────────────────────────

    /// Lex `text`, which starts at byte `offset` of the full expression.
    fn lex(&self, text: &str, offset: usize) -> Result<Vec<Token>> {
        let LexResult { tokens, mut errors } = Lexer::new(text).with_offset(offset).lex();
        if self.config.strict_brackets && !errors.is_empty() {
            return Err(errors.swap_remove(0));
        }
        Ok(tokens)
    }

    // ── Building ─────────────────────────────────────────────────────────

    /// One token is a full command. Several tokens form `name,arg,arg...`:
    /// the first is the command name, scalar literals become literal
    /// children and everything else goes back through the whole pipeline.
    fn build_tokens(&self, tokens: &[Token], depth: usize) -> Result<SyntaxNode> {
        let (first, rest) = match tokens.split_first() {
            Some(split) => split,
            None => {
                let span = Span::point(0);
                self.check_name("", span)?;
                return Ok(SyntaxNode::command("", Vec::new(), span));
            }
        };
        if rest.is_empty() {
            return self.build_command(first, depth);
        }

        self.check_depth(depth, first.span)?;
        self.check_name(&first.text, first.span)?;

        let mut args = Vec::with_capacity(rest.len());
        for token in rest {
            let arg = match Literal::parse_scalar(&token.text) {
                Some(lit) => SyntaxNode::literal(lit, token.span),
                None => self.reparse(token, depth + 1)?,
            };
            args.push(arg);
        }
        let span = tokens
            .iter()
            .fold(first.span, |span, token| span.merge(token.span));
        Ok(SyntaxNode::command(first.text.clone(), args, span))
    }

    /// `name[p1,p2,...]` or a bare `name`.
    fn build_command(&self, token: &Token, depth: usize) -> Result<SyntaxNode> {
        self.check_depth(depth, token.span)?;

        let (head, params) = token.split_head();
        let name = head.trim();
        self.check_name(name, token.span)?;

        let mut args = Vec::new();
        if let Some((blob, rel)) = params {
            for param in self.lex(blob, token.span.start + rel)? {
                args.push(self.build_param(&param, depth)?);
            }
        }
        Ok(SyntaxNode::command(name, args, token.span))
    }

    /// A parameter is a scalar literal, a nested expression if it has
    /// brackets, and a plain string otherwise.
    fn build_param(&self, param: &Token, depth: usize) -> Result<SyntaxNode> {
        if let Some(lit) = Literal::parse_scalar(&param.text) {
            return Ok(SyntaxNode::literal(lit, param.span));
        }
        if param.has_brackets() {
            return self.reparse(param, depth + 1);
        }
        Ok(SyntaxNode::literal(
            Literal::Str(param.text.clone()),
            param.span,
        ))
    }

    /// Re-tokenize a token and build it as a sub-expression.
    fn reparse(&self, token: &Token, depth: usize) -> Result<SyntaxNode> {
        let tokens = self.lex(&token.text, token.span.start)?;
        if tokens.is_empty() {
            self.check_name("", token.span)?;
            return Ok(SyntaxNode::command("", Vec::new(), token.span));
        }
        self.build_tokens(&tokens, depth)
    }

    // ── Checks ───────────────────────────────────────────────────────────

    fn check_depth(&self, depth: usize, span: Span) -> Result<()> {
        let limit = self.config.depth_limit();
        if depth > limit {
            return Err(BrexError::depth_exceeded(limit, span));
        }
        Ok(())
    }

    fn check_name(&self, name: &str, span: Span) -> Result<()> {
        if !self.config.strict_brackets {
            return Ok(());
        }
        if name.is_empty() {
            return Err(BrexError::malformed("empty command name", span));
        }
        if name.contains(['[', ']']) {
            return Err(BrexError::malformed(
                format!("command name '{name}' contains a bracket"),
                span,
            ));
        }
        Ok(())
    }
}

/// Build a syntax tree with the default configuration.
pub fn build(input: &str) -> Result<SyntaxNode> {
    Parser::new(input).parse()
}

/// Build a syntax tree from top-level tokens with the default configuration.
pub fn build_tokens(tokens: &[Token]) -> Result<SyntaxNode> {
    Parser::new("").parse_tokens(tokens)
}
