use chat_surface::markdown_to_markup;

#[test]
fn bold_pairs_render_enclosed_in_emphasis_markup() {
    let cases = [
        ("**negrito**", "<b>negrito</b>"),
        ("antes **meio** depois", "antes <b>meio</b> depois"),
        ("**a** e **b**", "<b>a</b> e <b>b</b>"),
        ("****", "<b></b>"),
    ];

    for (input, expected) in cases {
        assert_eq!(markdown_to_markup(input), expected, "input: {input:?}");
    }
}

#[test]
fn stray_single_delimiters_are_removed() {
    let cases = [
        ("*solto*", "solto"),
        ("a * b", "a  b"),
        ("**par** e *impar", "<b>par</b> e impar"),
    ];

    for (input, expected) in cases {
        assert_eq!(markdown_to_markup(input), expected, "input: {input:?}");
    }
}

#[test]
fn newlines_render_as_line_breaks() {
    assert_eq!(
        markdown_to_markup("linha um\nlinha dois\n\nlinha tres"),
        "linha um<br>linha dois<br><br>linha tres"
    );
}

#[test]
fn no_other_markdown_is_converted() {
    assert_eq!(
        markdown_to_markup("- item\n[link](url)\n`code`"),
        "- item<br>[link](url)<br>`code`"
    );
}

#[test]
fn dynamic_markup_is_escaped_not_interpreted() {
    assert_eq!(
        markdown_to_markup(r#"<img src=x onerror="x()">"#),
        r#"&lt;img src=x onerror="x()"&gt;"#
    );
}
