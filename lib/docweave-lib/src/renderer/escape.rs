/// Escape code for embedding inside `<pre>` blocks
pub fn escape_html(code: &str) -> String {
    let mut escaped = String::with_capacity(code.len());
    for c in code.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape_html("var h = History<Delisting>(symbol);"),
            "var h = History&lt;Delisting&gt;(symbol);"
        );
        assert_eq!(escape_html("a && b"), "a &amp;&amp; b");
        assert_eq!(escape_html("plain"), "plain");
    }
}
