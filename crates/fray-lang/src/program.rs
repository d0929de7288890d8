//! Agent program text: tokenisation, label index, and line recovery.

use indexmap::IndexMap;

/// A parsed agent program.
///
/// Parsing never fails: tokenisation is purely lexical, and tokens that
/// turn out to be neither opcodes, literals, nor labels fault at
/// execution time. The program keeps its source text and a per-line
/// token count so a fault can be traced back to the line that raised it.
#[derive(Clone, Debug)]
pub struct Program {
    source: String,
    tokens: Vec<String>,
    line_token_counts: Vec<usize>,
    labels: IndexMap<String, usize>,
}

/// Strip one layer of surrounding double quotes, if present.
fn strip_quotes(name: &str) -> &str {
    if name.len() >= 2 && name.starts_with('"') && name.ends_with('"') {
        &name[1..name.len() - 1]
    } else {
        name
    }
}

impl Program {
    /// Tokenise `source` and build the label index.
    ///
    /// Per line: everything from the first `#` is a comment; an empty
    /// line yields no tokens; a line containing `:` emits the trimmed
    /// left side (colon reattached) as one label token followed by the
    /// whitespace-split right side; any other line is whitespace-split.
    ///
    /// Every token ending in `:` defines a label (quotes stripped from
    /// the name) pointing at the following token; a later definition of
    /// the same name overwrites an earlier one.
    pub fn parse(source: &str) -> Self {
        let mut tokens = Vec::new();
        let mut line_token_counts = Vec::new();

        for raw in source.lines() {
            let uncommented = match raw.find('#') {
                Some(i) => &raw[..i],
                None => raw,
            };
            let line = uncommented.trim();
            let before = tokens.len();

            if line.is_empty() {
                // No tokens on this line.
            } else if let Some(colon) = line.find(':') {
                let (label_part, rest) = line.split_at(colon);
                tokens.push(format!("{}:", label_part.trim()));
                tokens.extend(rest[1..].split_whitespace().map(str::to_string));
            } else {
                tokens.extend(line.split_whitespace().map(str::to_string));
            }

            line_token_counts.push(tokens.len() - before);
        }

        let mut labels = IndexMap::new();
        for (i, token) in tokens.iter().enumerate() {
            if let Some(name) = token.strip_suffix(':') {
                labels.insert(strip_quotes(name).to_string(), i + 1);
            }
        }

        Self {
            source: source.to_string(),
            tokens,
            line_token_counts,
            labels,
        }
    }

    /// The token at `index`, if in range.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the program has no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token index a label resolves to: the position just past its
    /// definition.
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// True when `token` is the definition of a known label, in either
    /// the bare (`name:`) or quoted (`"name":`) spelling.
    pub fn is_label_definition(&self, token: &str) -> bool {
        token
            .strip_suffix(':')
            .is_some_and(|name| self.labels.contains_key(strip_quotes(name)))
    }

    /// The program source as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Recover the source line holding the token at `index`.
    ///
    /// Walks the per-line token counts accumulated at tokenisation and
    /// returns the zero-based line number with the line's text. `None`
    /// when `index` is past the last token.
    pub fn line_of_token(&self, index: usize) -> Option<(usize, &str)> {
        let mut seen = 0;
        for (line_no, count) in self.line_token_counts.iter().enumerate() {
            seen += count;
            if seen > index {
                let text = self.source.lines().nth(line_no)?;
                return Some((line_no, text));
            }
        }
        None
    }
}
