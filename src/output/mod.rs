mod report;

pub use report::{render_json, render_markdown, render_plan_table, write_output};
