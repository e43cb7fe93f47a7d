//! Static charts, the resource sunburst page and result export.

pub mod axis;
pub mod bars;
pub mod boxplot;
pub mod export;
pub mod heatmap;
pub mod palette;
pub mod sunburst;
pub mod svg;

pub use bars::render_transfer_bars;
pub use boxplot::{render_insurance_boxplot, render_medication_boxplot};
pub use export::{write_json, write_parquet, write_text};
pub use heatmap::{heatmap_title, render_lab_heatmap};
pub use sunburst::{SunburstData, render_resource_sunburst};
pub use svg::SvgDocument;
