use std::time::Duration;

pub fn format_duration_short(duration: Duration) -> String {
    let s = humantime::format_duration(duration).to_string();
    s.split(' ').take(2).collect::<Vec<_>>().join(" ")
}

pub fn dry_run_indicator(show: bool) -> &'static str {
    if show { " (dry-run)" } else { "" }
}
