//! Info command implementation

use colored::Colorize;
use sitepath_core::{Finding, Record, SiteContext, Status, Target, inspect, run_batch};

use crate::cli::TargetArgs;
use crate::error::Result;

/// Print every record for each target. Without targets, every placed name
/// is inspected.
pub fn run_info(ctx: &SiteContext, args: &TargetArgs) -> Result<()> {
    let mut items = args.collect(ctx)?;
    if items.is_empty() && args.read.is_none() {
        items = Status::scan(ctx.candidates())?.names.into_iter().collect();
        if items.is_empty() {
            println!("{}", "No sitepath placements found".dimmed());
            return Ok(());
        }
    }

    run_batch("info", &items, |item| {
        let target = Target::parse(item, ctx.cwd(), args.name_only)?;
        let inspection = inspect(ctx, &target)?;
        for finding in &inspection.findings {
            for line in format_finding(inspection.name.as_str(), finding) {
                println!("{line}");
            }
        }
        Ok(())
    })?;
    Ok(())
}

/// Lines describing one record, fields right-aligned like `key: value`.
pub fn format_finding(name: &str, finding: &Finding) -> Vec<String> {
    let field = |key: &str, value: String| format!("{key:>10}: {value}");
    let mut lines = vec![
        format!("{}:", name.bold()),
        field("marker", finding.sidecar.display().to_string()),
    ];

    match &finding.record {
        Record::Marker(marker) => {
            lines.push(field("when", marker.when.to_rfc3339()));
            if let Some(pth) = &finding.pth {
                lines.push(field("pth", format!("{pth:?}")));
            }
            let mut from = marker.from.display().to_string();
            if !finding.annotations.is_empty() {
                let notes: Vec<String> =
                    finding.annotations.iter().map(ToString::to_string).collect();
                from = format!("{from} # {}", notes.join(" ").yellow());
            }
            lines.push(field("from", from));
            lines.push(field("how", marker.how.to_string()));
            lines.push(field("base", marker.base.clone()));
        }
        Record::Unrecognized { contents } => {
            lines.push(field("contents", format!("{contents:?}")));
            for note in &finding.annotations {
                lines.push(field("note", note.to_string()));
            }
        }
    }
    lines
}
