//! Template sources for each view.
//!
//! Document templates frame a whole script; fragment templates are expanded
//! once per cluster, node or edge. Every fragment ends with a newline.

/// The template sources making up one view.
///
/// A view without a cluster fragment draws no system containers.
pub(super) struct ViewSources {
    pub(super) document: &'static str,
    pub(super) cluster: Option<&'static str>,
    pub(super) service: &'static str,
    pub(super) focus: &'static str,
    pub(super) external: &'static str,
    pub(super) boundary: &'static str,
    pub(super) sync_edge: &'static str,
    pub(super) async_edge: &'static str,
}

const SERVICE_NODE: &str = "\
{{path}}: {
  shape: rectangle
}
";

const FOCUS_NODE: &str = "\
{{path}}: {
  shape: rectangle
  style: {
    stroke-width: 4
    bold: true
  }
}
";

const EXTERNAL_NODE: &str = "\
{{path}}: {
  shape: cloud
  style.stroke-dash: 3
}
";

const BOUNDARY_NODE: &str = "\
{{path}}: {
  shape: rectangle
  style: {
    stroke-dash: 3
    opacity: 0.7
  }
}
";

const SYNC_EDGE: &str = "{{source}} -> {{target}}: {{label}}\n";

const ASYNC_EDGE: &str = "\
{{source}} -> {{target}}: {{label}} {
  style: {
    stroke-dash: 5
    animated: true
  }
}
";

pub(super) const OVERVIEW: ViewSources = ViewSources {
    document: "\
# Generated by archmap. Do not edit.
direction: right

{{title_key}}: {{title}} {
  shape: text
  near: top-center
  style: {
    font-size: 28
    bold: true
  }
}

{{clusters}}
{{nodes}}
{{edges}}",
    cluster: Some(
        "\
{{key}}: {
  label: {{label}}
  style: {
    fill: \"#f4f6fa\"
    stroke: \"#8a94a6\"
    border-radius: 8
  }
}
",
    ),
    service: SERVICE_NODE,
    focus: FOCUS_NODE,
    external: EXTERNAL_NODE,
    boundary: BOUNDARY_NODE,
    sync_edge: SYNC_EDGE,
    async_edge: ASYNC_EDGE,
};

pub(super) const SERVICE_RELATIONSHIPS: ViewSources = ViewSources {
    document: "\
# Generated by archmap. Do not edit.
direction: right

{{title_key}}: {{title}} {
  shape: text
  near: top-center
  style.font-size: 24
}

{{clusters}}
{{nodes}}
{{edges}}",
    cluster: None,
    service: SERVICE_NODE,
    focus: FOCUS_NODE,
    external: EXTERNAL_NODE,
    boundary: BOUNDARY_NODE,
    sync_edge: SYNC_EDGE,
    async_edge: ASYNC_EDGE,
};

pub(super) const SYSTEM: ViewSources = ViewSources {
    document: "\
# Generated by archmap. Do not edit.
direction: down

{{title_key}}: {{title}} {
  shape: text
  near: top-center
  style: {
    font-size: 28
    bold: true
  }
}

{{clusters}}
{{nodes}}
{{edges}}",
    cluster: Some(
        "\
{{key}}: {
  label: {{label}}
  style: {
    fill: \"#eef4ff\"
    stroke: \"#3b6fd8\"
    stroke-width: 2
    border-radius: 8
  }
}
",
    ),
    service: SERVICE_NODE,
    focus: FOCUS_NODE,
    external: EXTERNAL_NODE,
    boundary: BOUNDARY_NODE,
    sync_edge: SYNC_EDGE,
    async_edge: ASYNC_EDGE,
};
