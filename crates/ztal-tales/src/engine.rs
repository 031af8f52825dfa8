//! Registration of every helper with a Tera instance

use tera::Tera;

use crate::{date, form, generic};

/// Registers the helper filters, testers and functions
///
/// | kind | names |
/// |------|-------|
/// | filters | `uc`, `str_replace`, `from_json`, `value_type`, `modulo`, `if_true`, `date_format`, `number_format`, `currency`, `input_type`, `data_attributes` |
/// | testers | `equal`, `between`, `before`, `after`, `opt_group`, `checked`, plus every form predicate |
/// | functions | `form_attrib`, `form_element`, `form_errors` |
///
/// # Example
///
/// ```rust
/// use tera::{Context, Tera};
///
/// let mut tera = Tera::default();
/// ztal_tales::register(&mut tera);
/// tera.add_raw_template("t", r#"{{ name | uc(mode="all") }}"#).unwrap();
///
/// let mut context = Context::new();
/// context.insert("name", "ada");
/// assert_eq!(tera.render("t", &context).unwrap(), "ADA");
/// ```
pub fn register(tera: &mut Tera) {
	tera.register_filter("uc", generic::uc_filter);
	tera.register_filter("str_replace", generic::str_replace_filter);
	tera.register_filter("from_json", generic::from_json_filter);
	tera.register_filter("value_type", generic::value_type_filter);
	tera.register_filter("modulo", generic::modulo_filter);
	tera.register_filter("if_true", generic::if_true_filter);
	tera.register_filter("date_format", generic::date_format_filter);
	tera.register_filter("number_format", generic::number_format_filter);
	tera.register_filter("currency", generic::currency_filter);
	tera.register_tester("equal", generic::equal_tester);

	tera.register_tester("between", date::between_tester);
	tera.register_tester("before", date::before_tester);
	tera.register_tester("after", date::after_tester);

	tera.register_filter("input_type", form::input_type_filter);
	tera.register_filter("data_attributes", form::data_attributes_filter);
	tera.register_tester("opt_group", form::opt_group_tester);
	tera.register_tester("checked", form::checked_tester);
	for (name, predicate) in form::ELEMENT_TESTERS {
		tera.register_tester(name, form::element_tester(name, predicate));
	}
	for (name, predicate) in form::NODE_TESTERS {
		tera.register_tester(name, form::node_tester(name, predicate));
	}
	tera.register_function("form_attrib", form::form_attrib_function);
	tera.register_function("form_element", form::form_element_function);
	tera.register_function("form_errors", form::form_errors_function);

	tracing::trace!("template helpers registered");
}
