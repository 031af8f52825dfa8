//! Form introspection for templates
//!
//! Templates that draw forms generically need to ask what kind of control an
//! element is, whether it is disabled, which errors it carries and so on.
//! Forms reach the template as serialized [`Form`] descriptions; the helpers
//! here answer those questions from the description alone.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tera::Result as TeraResult;

use crate::generic::{equal, is_true};

/// Types drawn as `<input>`
const INPUT_TYPES: [&str; 6] = ["text", "hidden", "password", "date", "email", "file"];

/// Types whose label precedes the control
const LABEL_BEFORE_TYPES: [&str; 8] = [
	"date",
	"email",
	"password",
	"file",
	"select",
	"multiselect",
	"text",
	"textarea",
];

/// Types whose label follows the control
const LABEL_AFTER_TYPES: [&str; 2] = ["checkbox", "radio"];

/// One form control
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormElement {
	/// Field name
	pub name: String,
	/// Element type, possibly namespaced (`Form_Element_Text`)
	#[serde(rename = "type")]
	pub element_type: String,
	/// Label text
	pub label: Option<String>,
	/// Current value; an array for multi-valued controls
	pub value: Value,
	/// Whether a value is required
	pub required: bool,
	/// HTML attributes, with nested `data` attributes
	pub attribs: Map<String, Value>,
	/// Validation error codes
	pub errors: Vec<String>,
	/// Custom error messages
	pub custom_errors: Vec<String>,
	/// Options of choice controls, option groups nest as objects
	pub multi_options: Option<Map<String, Value>>,
	/// Image of an image captcha
	pub image_url: Option<String>,
}

/// An entry of a form: a control or a group of controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormNode {
	/// A titled group of controls
	DisplayGroup {
		/// Group name
		name: String,
		/// Legend text
		#[serde(default)]
		legend: Option<String>,
		/// Controls in the group
		elements: Vec<FormElement>,
	},
	/// A single control
	Element(FormElement),
}

/// A form description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Form {
	/// Form name
	pub name: String,
	/// Controls and groups in display order
	pub nodes: Vec<FormNode>,
}

impl Form {
	/// Every control, groups flattened in order
	pub fn elements(&self) -> impl Iterator<Item = &FormElement> {
		self.nodes.iter().flat_map(|node| match node {
			FormNode::Element(element) => std::slice::from_ref(element),
			FormNode::DisplayGroup { elements, .. } => elements.as_slice(),
		})
	}
}

/// Simple type of a possibly namespaced element type
///
/// Takes the last `_`-separated segment, lower-cased. `multicheckbox` is
/// reported as `checkbox`.
///
/// ```rust
/// use ztal_tales::form::calculate_type;
///
/// assert_eq!(calculate_type("Zend_Form_Element_MultiCheckbox"), "checkbox");
/// assert_eq!(calculate_type("Text"), "text");
/// ```
pub fn calculate_type(element_type: &str) -> String {
	let simple = element_type
		.rsplit('_')
		.next()
		.unwrap_or_default()
		.to_lowercase();
	if simple == "multicheckbox" {
		"checkbox".to_string()
	} else {
		simple
	}
}

/// Simple type of `element`
pub fn input_type(element: &FormElement) -> String {
	calculate_type(&element.element_type)
}

fn type_is(element: &FormElement, simple: &str) -> bool {
	input_type(element) == simple
}

fn type_in(element: &FormElement, types: &[&str]) -> bool {
	types.contains(&input_type(element).as_str())
}

fn has_label(element: &FormElement) -> bool {
	element.label.as_deref().is_some_and(|label| !label.is_empty())
}

/// Whether `node` is a display group
pub fn is_display_group(node: &FormNode) -> bool {
	matches!(node, FormNode::DisplayGroup { .. })
}

/// Whether `node` is a visible control
pub fn is_form_element(node: &FormNode) -> bool {
	matches!(node, FormNode::Element(element) if !type_is(element, "hidden"))
}

/// Whether `node` is a hidden control
pub fn is_hidden_element(node: &FormNode) -> bool {
	matches!(node, FormNode::Element(element) if type_is(element, "hidden"))
}

/// Whether `element` is a button
pub fn is_button(element: &FormElement) -> bool {
	type_is(element, "button")
}

/// Whether `element` is a captcha without an image
pub fn is_captcha(element: &FormElement) -> bool {
	type_is(element, "captcha") && element.image_url.is_none()
}

/// Whether `element` is an image captcha
pub fn is_image_captcha(element: &FormElement) -> bool {
	type_is(element, "captcha") && element.image_url.is_some()
}

/// Whether a select option is an option group
pub fn is_opt_group(option: &Value) -> bool {
	option.is_array() || option.is_object()
}

/// Whether `option` is among the selected values of a multi-valued control
pub fn is_checked(element: &FormElement, option: &Value) -> bool {
	match &element.value {
		Value::Array(selected) => selected.iter().any(|value| equal(value, option)),
		_ => false,
	}
}

/// Whether the `disabled` attribute is set
pub fn is_disabled(element: &FormElement) -> bool {
	element.attribs.get("disabled").is_some_and(is_true)
}

/// Whether a value is required
pub fn is_required(element: &FormElement) -> bool {
	element.required
}

/// Whether the `readonly` attribute is set
pub fn is_read_only(element: &FormElement) -> bool {
	element.attribs.get("readonly").is_some_and(is_true)
}

/// Whether `element` is drawn as an `<input>`
pub fn is_input(element: &FormElement) -> bool {
	type_in(element, &INPUT_TYPES)
}

/// Whether `element` is a password input
pub fn is_password(element: &FormElement) -> bool {
	type_is(element, "password")
}

/// Whether `element` is a group of checkboxes
pub fn is_multi_checkbox(element: &FormElement) -> bool {
	element.multi_options.is_some() && type_is(element, "checkbox")
}

/// Whether `element` is a radio group
pub fn is_radio(element: &FormElement) -> bool {
	type_is(element, "radio")
}

/// Whether `element` is a checkbox, single or multiple
pub fn is_checkbox(element: &FormElement) -> bool {
	type_is(element, "checkbox")
}

/// Whether `element` is a single select
pub fn is_select(element: &FormElement) -> bool {
	type_is(element, "select")
}

/// Whether `element` is a multiple select
pub fn is_multi_select(element: &FormElement) -> bool {
	type_is(element, "multiselect")
}

/// Whether `element` is a textarea
pub fn is_textarea(element: &FormElement) -> bool {
	type_is(element, "textarea")
}

/// Whether a label is drawn before the control
pub fn show_label_before(element: &FormElement) -> bool {
	type_in(element, &LABEL_BEFORE_TYPES) && has_label(element)
}

/// Whether a label is drawn after the control
pub fn show_label_after(element: &FormElement) -> bool {
	type_in(element, &LABEL_AFTER_TYPES) && has_label(element)
}

/// HTML attribute `name` of `element`
pub fn get_attrib<'a>(element: &'a FormElement, name: &str) -> Option<&'a Value> {
	element.attribs.get(name)
}

/// The control called `name`, searching inside display groups
pub fn get_element<'a>(form: &'a Form, name: &str) -> Option<&'a FormElement> {
	form.elements().find(|element| element.name == name)
}

/// Error codes followed by custom messages of the control called `name`
///
/// Unknown controls have no errors.
pub fn merged_errors(form: &Form, name: &str) -> Vec<String> {
	get_element(form, name)
		.map(|element| {
			element
				.errors
				.iter()
				.chain(&element.custom_errors)
				.cloned()
				.collect()
		})
		.unwrap_or_default()
}

/// Renders the `data` attribute map as `data-*` attributes
///
/// Values are HTML-escaped; pairs are separated by single spaces.
///
/// ```rust
/// use serde_json::json;
/// use ztal_tales::form::{FormElement, data_attributes};
///
/// let element: FormElement = serde_json::from_value(json!({
///     "name": "city",
///     "attribs": {"data": {"lookup": "/cities?q=<term>"}}
/// })).unwrap();
/// assert_eq!(data_attributes(&element), r#"data-lookup="/cities?q=&lt;term&gt;""#);
/// ```
pub fn data_attributes(element: &FormElement) -> String {
	let Some(Value::Object(data)) = element.attribs.get("data") else {
		return String::new();
	};
	data.iter()
		.map(|(key, value)| {
			let text = match value {
				Value::String(s) => s.clone(),
				Value::Null => String::new(),
				other => other.to_string(),
			};
			format!(
				"data-{}=\"{}\"",
				key,
				html_escape::encode_double_quoted_attribute(&text)
			)
		})
		.collect::<Vec<_>>()
		.join(" ")
}

fn decode<T: DeserializeOwned>(helper: &str, value: &Value) -> TeraResult<T> {
	serde_json::from_value(value.clone())
		.map_err(|e| tera::Error::msg(format!("{helper} expects a form description: {e}")))
}

fn required_arg<'a>(
	helper: &str,
	args: &'a HashMap<String, Value>,
	name: &str,
) -> TeraResult<&'a Value> {
	args.get(name)
		.ok_or_else(|| tera::Error::msg(format!("{helper} requires a '{name}' argument")))
}

fn required_str<'a>(
	helper: &str,
	args: &'a HashMap<String, Value>,
	name: &str,
) -> TeraResult<&'a str> {
	required_arg(helper, args, name)?
		.as_str()
		.ok_or_else(|| tera::Error::msg(format!("{helper} requires '{name}' to be a string")))
}

/// A tester over one control
pub type ElementPredicate = fn(&FormElement) -> bool;

/// A tester over a form entry
pub type NodePredicate = fn(&FormNode) -> bool;

/// Element testers by their template name
pub const ELEMENT_TESTERS: [(&str, ElementPredicate); 16] = [
	("button", is_button),
	("captcha", is_captcha),
	("image_captcha", is_image_captcha),
	("disabled", is_disabled),
	("required", is_required),
	("read_only", is_read_only),
	("input", is_input),
	("password", is_password),
	("multi_checkbox", is_multi_checkbox),
	("radio", is_radio),
	("checkbox", is_checkbox),
	("select", is_select),
	("multi_select", is_multi_select),
	("textarea", is_textarea),
	("label_before", show_label_before),
	("label_after", show_label_after),
];

/// Form entry testers by their template name
pub const NODE_TESTERS: [(&str, NodePredicate); 3] = [
	("display_group", is_display_group),
	("form_element", is_form_element),
	("hidden_element", is_hidden_element),
];

/// Adapts an element predicate to a Tera tester
///
/// # Example
/// ```tera
/// {% if field is textarea %}<textarea name="{{ field.name }}"></textarea>{% endif %}
/// ```
pub fn element_tester(
	name: &'static str,
	predicate: ElementPredicate,
) -> impl Fn(Option<&Value>, &[Value]) -> TeraResult<bool> + Send + Sync {
	move |value: Option<&Value>, _args: &[Value]| {
		let value = value.unwrap_or(&Value::Null);
		Ok(predicate(&decode::<FormElement>(name, value)?))
	}
}

/// Adapts a form entry predicate to a Tera tester
pub fn node_tester(
	name: &'static str,
	predicate: NodePredicate,
) -> impl Fn(Option<&Value>, &[Value]) -> TeraResult<bool> + Send + Sync {
	move |value: Option<&Value>, _args: &[Value]| {
		let value = value.unwrap_or(&Value::Null);
		Ok(predicate(&decode::<FormNode>(name, value)?))
	}
}

/// Tests whether a select option is an option group
pub fn opt_group_tester(value: Option<&Value>, _args: &[Value]) -> TeraResult<bool> {
	Ok(value.is_some_and(is_opt_group))
}

/// Tests whether an option is selected
///
/// # Example
/// ```tera
/// <input type="checkbox" {% if field is checked(key) %}checked{% endif %} />
/// ```
pub fn checked_tester(value: Option<&Value>, args: &[Value]) -> TeraResult<bool> {
	let element = decode::<FormElement>("checked", value.unwrap_or(&Value::Null))?;
	let option = args
		.first()
		.ok_or_else(|| tera::Error::msg("checked tester requires the option value"))?;
	Ok(is_checked(&element, option))
}

/// Simple type of a control
pub fn input_type_filter(value: &Value, _args: &HashMap<String, Value>) -> TeraResult<Value> {
	let element = decode::<FormElement>("input_type", value)?;
	Ok(Value::String(input_type(&element)))
}

/// `data-*` attributes of a control
///
/// The output is already escaped; mark it `safe`.
///
/// # Example
/// ```tera
/// <input name="{{ field.name }}" {{ field|data_attributes|safe }} />
/// ```
pub fn data_attributes_filter(value: &Value, _args: &HashMap<String, Value>) -> TeraResult<Value> {
	let element = decode::<FormElement>("data_attributes", value)?;
	Ok(Value::String(data_attributes(&element)))
}

/// `form_attrib(element=field, name="maxlength")`
pub fn form_attrib_function(args: &HashMap<String, Value>) -> TeraResult<Value> {
	let element = decode::<FormElement>("form_attrib", required_arg("form_attrib", args, "element")?)?;
	let name = required_str("form_attrib", args, "name")?;
	Ok(get_attrib(&element, name).cloned().unwrap_or(Value::Null))
}

/// `form_element(form=form, name="email")`
pub fn form_element_function(args: &HashMap<String, Value>) -> TeraResult<Value> {
	let form = decode::<Form>("form_element", required_arg("form_element", args, "form")?)?;
	let name = required_str("form_element", args, "name")?;
	match get_element(&form, name) {
		Some(element) => serde_json::to_value(element).map_err(|e| tera::Error::msg(e.to_string())),
		None => Ok(Value::Null),
	}
}

/// `form_errors(form=form, name="email")`
///
/// Yields `null` instead of an empty list so `default` filters apply.
pub fn form_errors_function(args: &HashMap<String, Value>) -> TeraResult<Value> {
	let form = decode::<Form>("form_errors", required_arg("form_errors", args, "form")?)?;
	let name = required_str("form_errors", args, "name")?;
	let errors = merged_errors(&form, name);
	if errors.is_empty() {
		Ok(Value::Null)
	} else {
		Ok(Value::from(errors))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn element(element_type: &str) -> FormElement {
		FormElement {
			name: "field".to_string(),
			element_type: element_type.to_string(),
			label: Some("Field".to_string()),
			..Default::default()
		}
	}

	#[rstest]
	#[case("Zend_Form_Element_Text", "text")]
	#[case("Zend_Form_Element_MultiCheckbox", "checkbox")]
	#[case("Multiselect", "multiselect")]
	#[case("", "")]
	fn test_calculate_type(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(calculate_type(raw), expected);
	}

	#[rstest]
	#[case("text", true)]
	#[case("Form_Element_Email", true)]
	#[case("file", true)]
	#[case("textarea", false)]
	#[case("select", false)]
	fn test_is_input(#[case] element_type: &str, #[case] expected: bool) {
		assert_eq!(is_input(&element(element_type)), expected);
	}

	#[test]
	fn test_label_placement() {
		assert!(show_label_before(&element("textarea")));
		assert!(!show_label_after(&element("textarea")));
		assert!(show_label_after(&element("radio")));
		assert!(!show_label_before(&element("button")));

		let mut unlabelled = element("text");
		unlabelled.label = Some(String::new());
		assert!(!show_label_before(&unlabelled));
	}

	#[test]
	fn test_captcha_kinds() {
		let mut captcha = element("Captcha");
		assert!(is_captcha(&captcha));
		assert!(!is_image_captcha(&captcha));
		captcha.image_url = Some("/captcha/1.png".to_string());
		assert!(is_image_captcha(&captcha));
		assert!(!is_captcha(&captcha));
	}

	#[test]
	fn test_multi_checkbox_needs_options() {
		let mut boxes = element("MultiCheckbox");
		assert!(is_checkbox(&boxes));
		assert!(!is_multi_checkbox(&boxes));
		boxes.multi_options = Some(Map::new());
		assert!(is_multi_checkbox(&boxes));
	}

	#[test]
	fn test_is_checked_only_for_array_values() {
		let mut boxes = element("MultiCheckbox");
		boxes.value = json!(["1", "3"]);
		assert!(is_checked(&boxes, &json!(1)));
		assert!(!is_checked(&boxes, &json!("2")));
		boxes.value = json!("1");
		assert!(!is_checked(&boxes, &json!("1")));
	}

	#[test]
	fn test_disabled_and_read_only_attributes() {
		let mut input = element("text");
		assert!(!is_disabled(&input));
		input.attribs.insert("disabled".to_string(), json!("disabled"));
		input.attribs.insert("readonly".to_string(), json!(false));
		assert!(is_disabled(&input));
		assert!(!is_read_only(&input));
	}

	#[test]
	fn test_nodes_from_json() {
		let form: Form = serde_json::from_value(json!({
			"name": "signup",
			"nodes": [
				{"name": "token", "type": "hidden"},
				{"name": "contact", "legend": "Contact", "elements": [
					{"name": "email", "type": "text", "errors": ["isEmpty"],
					 "custom_errors": ["Please enter an email"]}
				]}
			]
		}))
		.unwrap();

		assert!(is_hidden_element(&form.nodes[0]));
		assert!(!is_form_element(&form.nodes[0]));
		assert!(is_display_group(&form.nodes[1]));
		assert_eq!(form.elements().count(), 2);
		assert_eq!(
			merged_errors(&form, "email"),
			vec!["isEmpty".to_string(), "Please enter an email".to_string()]
		);
		assert!(merged_errors(&form, "missing").is_empty());
	}

	#[test]
	fn test_data_attributes_escape_and_join() {
		let mut input = element("text");
		input.attribs.insert(
			"data".to_string(),
			json!({"a": "x\"y", "count": 2}),
		);
		assert_eq!(data_attributes(&input), "data-a=\"x&quot;y\" data-count=\"2\"");
		assert_eq!(data_attributes(&element("text")), "");
	}

	#[test]
	fn test_element_tester_decodes_value() {
		let tester = element_tester("textarea", is_textarea);
		assert!(tester(Some(&json!({"type": "Textarea"})), &[]).unwrap());
		assert!(tester(Some(&json!("nope")), &[]).is_err());
	}

	#[test]
	fn test_form_errors_function_yields_null_when_clean() {
		let mut args = HashMap::new();
		args.insert("form".to_string(), json!({"nodes": [{"name": "a"}]}));
		args.insert("name".to_string(), json!("a"));
		assert_eq!(form_errors_function(&args).unwrap(), Value::Null);
	}
}
