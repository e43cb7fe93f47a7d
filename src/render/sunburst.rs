//! Interactive sunburst of resource utilization as a standalone HTML page
//!
//! The hierarchy is resource type, then category, then metric. Leaves carry
//! the row value and count; inner nodes sum the values of their children and
//! take the value-weighted mean count as their color, falling back to the
//! plain mean when the children sum to zero.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

use crate::algorithm::resources::ResourceRow;
use crate::error::Result;
use crate::render::svg::escape;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const TITLE: &str = "Hospital Resource Utilization Pattern";

/// Flat node arrays in the layout plotly expects
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SunburstData {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<f64>,
}

#[derive(Default)]
struct Node {
    value: f64,
    weighted_count: f64,
    plain_count: f64,
    leaves: usize,
}

impl Node {
    fn add(&mut self, value: f64, count: f64) {
        self.value += value;
        self.weighted_count += value * count;
        self.plain_count += count;
        self.leaves += 1;
    }

    fn color(&self) -> f64 {
        if self.value > 0.0 {
            self.weighted_count / self.value
        } else if self.leaves > 0 {
            self.plain_count / self.leaves as f64
        } else {
            0.0
        }
    }
}

impl SunburstData {
    fn push(&mut self, id: String, label: &str, parent: String, value: f64, color: f64) {
        self.ids.push(id);
        self.labels.push(label.to_string());
        self.parents.push(parent);
        self.values.push(value);
        self.colors.push(color);
    }

    /// Build the node arrays; roots come first, then categories, then leaves
    #[must_use]
    pub fn from_rows(rows: &[ResourceRow]) -> Self {
        let mut roots: BTreeMap<&str, Node> = BTreeMap::new();
        let mut categories: BTreeMap<(&str, &str), Node> = BTreeMap::new();
        for row in rows {
            let count = row.count as f64;
            roots.entry(row.resource_type.as_str()).or_default().add(row.value, count);
            categories
                .entry((row.resource_type.as_str(), row.category.as_str()))
                .or_default()
                .add(row.value, count);
        }

        let mut data = Self::default();
        for (resource_type, node) in &roots {
            data.push(
                (*resource_type).to_string(),
                resource_type,
                String::new(),
                node.value,
                node.color(),
            );
        }
        for ((resource_type, category), node) in &categories {
            data.push(
                format!("{resource_type}/{category}"),
                category,
                (*resource_type).to_string(),
                node.value,
                node.color(),
            );
        }
        for row in rows {
            data.push(
                format!("{}/{}/{}", row.resource_type, row.category, row.metric),
                &row.metric,
                format!("{}/{}", row.resource_type, row.category),
                row.value,
                row.count as f64,
            );
        }
        data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// JSON that cannot close the surrounding `<script>` element
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Render the resource rows as a self-contained HTML page
pub fn render_resource_sunburst(rows: &[ResourceRow]) -> Result<String> {
    let data = SunburstData::from_rows(rows);
    let trace = json!([{
        "type": "sunburst",
        "ids": data.ids,
        "labels": data.labels,
        "parents": data.parents,
        "values": data.values,
        "branchvalues": "total",
        "marker": {
            "colors": data.colors,
            "colorscale": "Viridis",
            "showscale": true,
            "colorbar": { "title": { "text": "Usage Count" } }
        },
        "hovertemplate": "%{label}<br>Value: %{value}<br>Usage Count: %{color}<extra></extra>"
    }]);
    let layout = json!({
        "title": { "text": TITLE, "x": 0.5, "font": { "size": 20 } },
        "width": 1000,
        "height": 800
    });

    let trace = script_safe(&serde_json::to_string(&trace)?);
    let layout = script_safe(&serde_json::to_string(&layout)?);
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="sunburst"></div>
<script>
Plotly.newPlot("sunburst", {trace}, {layout});
</script>
</body>
</html>
"#,
        title = escape(TITLE)
    ))
}
