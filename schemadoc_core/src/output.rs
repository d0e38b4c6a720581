/// Append-only sequence of markdown fragments.
///
/// Fragments are never reordered once pushed. The only in-place edit is
/// [`MarkdownLines::append_to_last`], which concatenates onto the most
/// recently pushed fragment (used to join clause text onto a bullet).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownLines {
	fragments: Vec<String>,
}

impl MarkdownLines {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, fragment: impl Into<String>) {
		self.fragments.push(fragment.into());
	}

	/// Append every fragment of `other`, preserving order.
	pub fn append(&mut self, other: Self) {
		self.fragments.extend(other.fragments);
	}

	pub fn extend<I, S>(&mut self, fragments: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fragments.extend(fragments.into_iter().map(Into::into));
	}

	/// Concatenate `text` onto the last fragment, pushing a new fragment if
	/// none exists yet.
	pub fn append_to_last(&mut self, text: &str) {
		match self.fragments.last_mut() {
			Some(last) => last.push_str(text),
			None => self.fragments.push(text.to_string()),
		}
	}

	pub fn fragments(&self) -> &[String] {
		&self.fragments
	}

	pub fn len(&self) -> usize {
		self.fragments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fragments.is_empty()
	}

	/// The concatenated document.
	pub fn to_markdown(&self) -> String {
		self.fragments.concat()
	}
}
