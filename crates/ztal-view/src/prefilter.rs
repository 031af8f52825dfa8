//! Source transformations applied before templates are compiled

use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Failed to compile comment pattern"));

static PRESERVED: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?is)<pre\b.*?</pre>|<textarea\b.*?</textarea>|\{\{.*?\}\}|\{%.*?%\}|\{#.*?#\}")
		.expect("Failed to compile preserved block pattern")
});

static WHITESPACE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace pattern"));

static BETWEEN_TAGS: Lazy<Regex> =
	Lazy::new(|| Regex::new(r">\s+<").expect("Failed to compile inter-tag pattern"));

/// Removes HTML comments
pub fn strip_comments(source: &str) -> String {
	COMMENT.replace_all(source, "").into_owned()
}

/// Collapses whitespace outside `<pre>` and `<textarea>` elements
///
/// Whitespace between two tags disappears. Any other run becomes a single
/// newline when it contained one, a single space otherwise. Template
/// expressions, statements and comments are copied unchanged.
pub fn compress_whitespace(source: &str) -> String {
	let mut out = String::with_capacity(source.len());
	let mut last = 0;
	let mut after_element = false;
	for preserved in PRESERVED.find_iter(source) {
		let is_element = preserved.as_str().starts_with('<');
		out.push_str(&compress_segment(
			&source[last..preserved.start()],
			after_element,
			is_element,
		));
		out.push_str(preserved.as_str());
		last = preserved.end();
		after_element = is_element;
	}
	out.push_str(&compress_segment(&source[last..], after_element, false));
	out
}

/// `preceded_by_tag` and `followed_by_tag` tell whether the segment borders a
/// preserved element, so whitespace against it counts as inter-tag.
/// Template spans are not elements.
fn compress_segment(segment: &str, preceded_by_tag: bool, followed_by_tag: bool) -> String {
	let joined = BETWEEN_TAGS.replace_all(segment, "><");
	let mut text: &str = &joined;

	let start = text.trim_start();
	if preceded_by_tag && (start.starts_with('<') || (start.is_empty() && followed_by_tag)) {
		text = start;
	}
	let end = text.trim_end();
	if followed_by_tag && end.ends_with('>') {
		text = end;
	}

	WHITESPACE
		.replace_all(text, |caps: &regex::Captures<'_>| {
			if caps[0].contains('\n') { "\n" } else { " " }
		})
		.into_owned()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_strip_comments_spans_lines() {
		let source = "<p>a</p><!-- one\ntwo --><p>b</p><!---->";
		assert_eq!(strip_comments(source), "<p>a</p><p>b</p>");
	}

	#[test]
	fn test_compress_whitespace() {
		let source = "<ul>\n   <li>one    two</li>\n\n  <li>three\n  four</li>\n</ul>";
		assert_eq!(
			compress_whitespace(source),
			"<ul><li>one two</li><li>three\nfour</li></ul>"
		);
	}

	#[test]
	fn test_compress_keeps_preformatted_blocks() {
		let source = "<div>\n  <pre>  a\n    b</pre>\n  <TEXTAREA> x  </TEXTAREA>  </div>";
		assert_eq!(
			compress_whitespace(source),
			"<div><pre>  a\n    b</pre><TEXTAREA> x  </TEXTAREA></div>"
		);
	}

	#[test]
	fn test_compress_keeps_template_spans() {
		let source = "<p>\n  {{ \"a  b\" }}  {%  if x  %}\n  <b>y</b>{#  note  #}\n</p>";
		assert_eq!(
			compress_whitespace(source),
			"<p>\n{{ \"a  b\" }} {%  if x  %}\n<b>y</b>{#  note  #}\n</p>"
		);
	}
}
