//! Templated mail bodies
//!
//! A mail template lives at `{mail_template_dir}/{name}.email` in any
//! template directory and defines a `plain` block and an `html` block:
//!
//! ```tera
//! {% block plain %}Hello {{ user.name }}, your order shipped.{% endblock plain %}
//! {% block html %}<p>Hello <b>{{ user.name }}</b>, your order shipped.</p>{% endblock html %}
//! ```
//!
//! Both blocks are rendered with the same context. Only the HTML body is
//! escaped.

use lettre::Message;
use lettre::message::{Mailbox, MultiPart, SinglePart};

use crate::context::RenderContext;
use crate::error::Result;
use crate::renderer::{MAIL_EXTENSION, TalView, camel_case_name};

/// Rendered bodies of one mail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailBody {
	/// Plain text body
	pub text: String,
	/// HTML body, empty when the template has no `html` block content
	pub html: String,
}

impl MailBody {
	/// Whether an HTML alternative was rendered
	pub fn has_html(&self) -> bool {
		!self.html.is_empty()
	}
}

/// Renders mail templates of a [`TalView`]
#[derive(Debug, Clone, Copy)]
pub struct MailComposer<'a> {
	view: &'a TalView,
}

impl<'a> MailComposer<'a> {
	/// Composes mail with the templates of `view`
	pub fn new(view: &'a TalView) -> Self {
		Self { view }
	}

	/// Registered name of the mail template `template`
	///
	/// Dash-separated names are converted to camelCase like page templates.
	pub fn template_name(&self, template: &str) -> String {
		format!(
			"{}/{}.{MAIL_EXTENSION}",
			self.view.settings().mail_template_dir.trim_end_matches('/'),
			camel_case_name(template)
		)
	}

	/// Renders both bodies of `template`
	///
	/// # Errors
	///
	/// [`crate::ViewError::TemplateNotFound`] when no such mail template
	/// exists, [`crate::ViewError::Render`] when either block fails.
	pub fn compose(&self, template: &str, context: &RenderContext) -> Result<MailBody> {
		let name = self.template_name(template);
		tracing::debug!(template = %name, "composing mail");
		let text = self.view.render_registered(format!("{name}.txt"), context)?;
		let html = self.view.render_registered(format!("{name}.html"), context)?;
		Ok(MailBody {
			text: text.trim().to_string(),
			html: html.trim().to_string(),
		})
	}

	/// Builds a message carrying `body`
	///
	/// Bodies with HTML become `multipart/alternative`; plain-only bodies a
	/// single `text/plain` part.
	///
	/// # Errors
	///
	/// [`crate::ViewError::Address`] for an unparseable mailbox and
	/// [`crate::ViewError::Mail`] when the message cannot be assembled.
	pub fn build_message(&self, body: &MailBody, from: &str, to: &str, subject: &str) -> Result<Message> {
		let builder = Message::builder()
			.from(from.parse::<Mailbox>()?)
			.to(to.parse::<Mailbox>()?)
			.subject(subject);
		let message = if body.has_html() {
			builder.multipart(MultiPart::alternative_plain_html(
				body.text.clone(),
				body.html.clone(),
			))?
		} else {
			builder.singlepart(SinglePart::plain(body.text.clone()))?
		};
		Ok(message)
	}

	/// Renders `template` and wraps it in a message
	pub fn message(
		&self,
		template: &str,
		context: &RenderContext,
		from: &str,
		to: &str,
		subject: &str,
	) -> Result<Message> {
		let body = self.compose(template, context)?;
		self.build_message(&body, from, to, subject)
	}
}
