//! Help view: global keys, navigation, search syntax and per-view keys.
use crate::view::theme::RenderContext;
use ratatui::text::{Line, Span};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("Ctrl+C", "Quit immediately"),
            ("q", "Quit (press twice outside the dashboard)"),
            ("?", "Toggle this help"),
            ("/", "Search the current view"),
            ("r, Ctrl+R", "Refresh the current view"),
            ("a", "Toggle auto-refresh"),
            ("Esc", "Back / cancel / clear filter"),
        ],
    ),
    (
        "Navigation",
        &[
            ("↑/k, ↓/j", "Move selection"),
            ("g g, G", "Go to top / bottom"),
            ("Ctrl+U, Ctrl+D", "Page up / down"),
            ("Enter, Space", "Select / connect"),
            ("d", "Show a one-line summary"),
            ("y", "Copy the row identifier"),
        ],
    ),
    (
        "Search",
        &[
            ("text", "Free text over every field"),
            ("key:value", "Tokens combine with AND"),
            ("name: id: state: type:", "Instance fields"),
            ("privateip: publicip:", "Instance addresses"),
            ("tag:Key=value", "Exact tag key, value substring"),
            ("cluster: status: version:", "Clusters and node groups"),
            ("ltname: ltid: ltversion:", "Node group launch template"),
        ],
    ),
    (
        "EC2 Instances",
        &[
            ("Enter", "Start a session (running instances only)"),
            ("Y", "Copy the private IP"),
        ],
    ),
    (
        "EKS Clusters",
        &[("Enter", "Show the cluster's node groups")],
    ),
    (
        "Auto Scaling Groups / Node Groups",
        &[
            ("Enter", "Set desired capacity"),
            ("u, U", "Change launch template version (node groups)"),
        ],
    ),
];

pub fn help_lines(ctx: &RenderContext) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (title, entries) in SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(format!("{title}:"), ctx.title())));
        lines.extend(entries.iter().map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("  {keys:<26}"), ctx.key_hint()),
                Span::styled(*what, ctx.base()),
            ])
        }));
    }
    lines
}
