//! Rebuilds readable text from Treebank-style tokens.

/// Tokens that attach to the token on their left.
const ATTACH_LEFT: &[&str] = &[
    ".", ",", ";", ":", "!", "?", "%", ")", "]", "}", "''", "...", "n't", "N'T",
];

/// Tokens that attach to the token on their right.
const ATTACH_RIGHT: &[&str] = &["(", "[", "{", "``", "$", "#"];

/// Clitics split off by the tokenizer (`'s`, `'re`, `'ll`, ...).
fn is_clitic(token: &str) -> bool {
    let Some(rest) = token.strip_prefix('\'') else {
        return false;
    };
    matches!(
        rest.to_ascii_lowercase().as_str(),
        "s" | "re" | "ve" | "ll" | "d" | "m"
    )
}

/// Join tokens into prose.
pub fn detokenize<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    detokenize_with(tokens, |_, text| text.to_string())
}

/// Join tokens into prose, letting `style` decorate each token's display
/// text. `style` receives the token position and the text to display.
pub fn detokenize_with<'a, I, F>(tokens: I, mut style: F) -> String
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(usize, &str) -> String,
{
    let mut out = String::new();
    let mut glue_next = true;
    let mut quote_open = false;

    for (position, token) in tokens.into_iter().enumerate() {
        let (display, attach_left, attach_right) = match token {
            "``" => ("\"", false, true),
            "''" => ("\"", true, false),
            "\"" => {
                quote_open = !quote_open;
                ("\"", !quote_open, quote_open)
            }
            _ => (
                token,
                ATTACH_LEFT.contains(&token) || is_clitic(token),
                ATTACH_RIGHT.contains(&token),
            ),
        };

        if !glue_next && !attach_left {
            out.push(' ');
        }
        out.push_str(&style(position, display));
        glue_next = attach_right;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detok(tokens: &[&str]) -> String {
        detokenize(tokens.iter().copied())
    }

    #[test]
    fn attaches_punctuation_left() {
        assert_eq!(detok(&["The", "dog", "barked", "."]), "The dog barked.");
        assert_eq!(detok(&["Yes", ",", "50", "%", "!"]), "Yes, 50%!");
    }

    #[test]
    fn attaches_brackets_and_currency_right() {
        assert_eq!(
            detok(&["It", "cost", "$", "5", "(", "roughly", ")", "."]),
            "It cost $5 (roughly)."
        );
    }

    #[test]
    fn rejoins_contractions_and_clitics() {
        assert_eq!(detok(&["I", "do", "n't", "know"]), "I don't know");
        assert_eq!(detok(&["John", "'s", "dog", "'ll", "bark"]), "John's dog'll bark");
    }

    #[test]
    fn converts_treebank_quotes() {
        assert_eq!(
            detok(&["He", "said", "``", "hello", "''", "."]),
            "He said \"hello\"."
        );
        assert_eq!(detok(&["\"", "Hi", "\"", "she", "said"]), "\"Hi\" she said");
    }

    #[test]
    fn styles_tokens_by_position() {
        let out = detokenize_with(["The", "dog", "barked"], |i, text| {
            if i == 1 {
                format!("*{text}*")
            } else {
                text.to_string()
            }
        });
        assert_eq!(out, "The *dog* barked");
    }

    #[test]
    fn empty_input_gives_empty_string() {
        assert_eq!(detok(&[]), "");
    }
}
