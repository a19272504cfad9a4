//! HTML returned to the browser after a redirect.

/// Renders the callback page showing `message`.
pub fn render(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"fr\">\n\
         <head><meta charset=\"utf-8\"><title>Callback OAuth</title></head>\n\
         <body>\n\
         <h1>Callback OAuth</h1>\n\
         <p>{}</p>\n\
         </body>\n\
         </html>\n",
        escape(message)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_escaped() {
        let html = render("<script>alert('x')</script>");
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("<title>Callback OAuth</title>"));
    }
}
