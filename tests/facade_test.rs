//! End-to-end use of the facade: request parameters to rendered table

use std::collections::HashMap;
use std::fs;

use rstest::*;
use serde_json::json;
use tempfile::TempDir;
use ztal::tables::{DataSource, Paginator, RecordColumn, SortDirection, Table};
use ztal::view::{RenderContext, TalView, ViewSettings};

#[fixture]
fn view() -> (TempDir, TalView) {
	let dir = TempDir::new().unwrap();
	fs::write(
		dir.path().join("scores.html"),
		concat!(
			"{% for column in scores.columns %}",
			"{{ column.header | uc(mode=\"all\") }}{% if column.is_sort_column %}*{% endif %};",
			"{% endfor %}\n",
			"{% for row in scores.rows %}{{ row.0.value }}={{ row.1.value }};{% endfor %}\n",
			"{% for page in scores.paginator.pages %}",
			"{% if page.is_current %}[{{ page.label }}]{% else %}{{ page.label }}{% endif %}",
			"{% endfor %}",
		),
	)
	.unwrap();
	let view = TalView::new(ViewSettings::default().with_template_dir(dir.path())).unwrap();
	(dir, view)
}

#[rstest]
fn test_request_to_rendered_table(view: (TempDir, TalView)) {
	let (_dir, view) = view;
	let request: HashMap<String, String> = [
		("scores-sort", "score"),
		("scores-direction", "desc"),
		("scores-page", "1"),
		("team", "red"),
	]
	.into_iter()
	.map(|(k, v)| (k.to_string(), v.to_string()))
	.collect();

	let mut table = Table::from_parameters(&request, |table| {
		table.set_id("scores");
		table.append_column(RecordColumn::new("name", "name"));
		table.append_column(RecordColumn::new("score", "score"));
		let mut paginator = Paginator::new();
		paginator.set_rows_per_page(2);
		table.set_paginator(paginator);
	});
	table
		.set_data_source(
			DataSource::from_json(json!([
				{"name": "ada", "score": 3},
				{"name": "bob", "score": 9},
				{"name": "cy", "score": 1},
				{"name": "di", "score": 7},
				{"name": "ed", "score": 5},
			]))
			.unwrap(),
			false,
		)
		.unwrap();

	assert_eq!(
		table.column("score").map(|column| column.sort_direction()),
		Some(SortDirection::Descending)
	);
	assert_eq!(table.url_params(), "/team/red");

	let output = view
		.render_table("scores", "scores", &table, &RenderContext::new())
		.unwrap();
	assert_eq!(output, "NAME;SCORE*;\ned=5;ada=3;\n1[2]3");
}
