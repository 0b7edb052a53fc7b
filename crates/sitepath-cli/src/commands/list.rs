//! List command implementation
//!
//! Output is one origin per line under `# sitepath-<kind>` headers, so it
//! can be saved and fed back through `-r`.

use std::collections::BTreeSet;
use std::fs;
use std::str::FromStr;

use sitepath_core::{Drift, SiteContext, Status};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListKind {
    Symlinks,
    Copies,
    Develops,
    Changed,
}

impl ListKind {
    fn header(self) -> &'static str {
        match self {
            Self::Symlinks => "# sitepath-symlinked",
            Self::Copies => "# sitepath-copied",
            Self::Develops => "# sitepath-developed",
            Self::Changed => "# sitepath-changed",
        }
    }
}

impl FromStr for ListKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "symlinks" | "syms" | "sym" | "symlinked" | "symlink" | "s" | "links" | "link"
            | "linked" => Ok(Self::Symlinks),
            "copies" | "copy" | "copied" | "c" => Ok(Self::Copies),
            "develops" | "dev" | "devs" | "developed" | "develop" | "d" => Ok(Self::Develops),
            "changed" | "changes" | "drift" => Ok(Self::Changed),
            other => Err(CliError::user(format!("not recognized: {other:?}"))),
        }
    }
}

/// Parse kind names; `all` expands to the three placement sets.
pub fn parse_kinds(raw: &[String]) -> Result<BTreeSet<ListKind>> {
    let mut kinds = BTreeSet::new();
    for name in raw {
        if name == "all" {
            kinds.extend([ListKind::Symlinks, ListKind::Copies, ListKind::Develops]);
        } else {
            kinds.insert(name.parse()?);
        }
    }
    Ok(kinds)
}

/// Render the requested listings.
pub fn render(status: &Status, kinds: &BTreeSet<ListKind>) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for kind in kinds {
        out.push(kind.header().to_string());
        match kind {
            ListKind::Symlinks => {
                for entry in &status.symlinked {
                    match fs::read_link(&entry.path) {
                        Ok(target) => out.push(target.display().to_string()),
                        Err(_) => out.push(format!(
                            "# Error: unable to readlink {:?}",
                            entry.path.display().to_string()
                        )),
                    }
                }
            }
            ListKind::Copies => {
                for entry in &status.copied {
                    out.push(match entry.origin() {
                        Some(origin) => origin.display().to_string(),
                        None => format!("# error: {:?}", entry.path.display().to_string()),
                    });
                }
            }
            ListKind::Develops => {
                for entry in &status.developed {
                    match &entry.pointer {
                        Some(pointer) => out.extend(pointer.pth.iter().cloned()),
                        None => out.push(format!(
                            "# Error: unable to read {:?}",
                            entry.path.display().to_string()
                        )),
                    }
                }
            }
            ListKind::Changed => {
                for (entry, drift) in status.drift()? {
                    if let (Drift::Changed(_) | Drift::Missing { .. }, Some(origin)) =
                        (&drift, entry.origin())
                    {
                        out.push(origin.display().to_string());
                    }
                }
            }
        }
    }
    Ok(out)
}

pub fn run_list(ctx: &SiteContext, raw_kinds: &[String]) -> Result<()> {
    let kinds = parse_kinds(raw_kinds)?;
    let status = Status::scan(ctx.candidates())?;
    for line in render(&status, &kinds)? {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitepath_core::{Candidate, Mode, place};
    use sitepath_test_utils::Sandbox;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn aliases_and_all() {
        let kinds = parse_kinds(&names(&["c", "link", "all"])).unwrap();
        assert_eq!(
            kinds.into_iter().collect::<Vec<_>>(),
            vec![ListKind::Symlinks, ListKind::Copies, ListKind::Develops]
        );
    }

    #[test]
    fn unknown_kind_is_a_user_error() {
        let err = parse_kinds(&names(&["everything"])).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn renders_origins_under_headers() {
        let sandbox = Sandbox::new();
        let candidates = vec![Candidate::new(sandbox.site())];
        let ctx = SiteContext::from_candidates(candidates, sandbox.root());
        place(&ctx, Mode::Symlink, "my_project").unwrap();
        place(&ctx, Mode::Copy, "my_file.py").unwrap();
        place(&ctx, Mode::Develop, "my_project").unwrap();
        sandbox.write("my_file.py", "file=False");

        let status = Status::scan(ctx.candidates()).unwrap();
        let all = parse_kinds(&names(&["all", "changed"])).unwrap();
        let lines = render(&status, &all).unwrap();

        let project = sandbox.project().display().to_string();
        let file = sandbox.module_file().display().to_string();
        let root = sandbox.root().display().to_string();
        assert_eq!(
            lines,
            vec![
                "# sitepath-symlinked".to_string(),
                project,
                "# sitepath-copied".to_string(),
                file.clone(),
                "# sitepath-developed".to_string(),
                root,
                "# sitepath-changed".to_string(),
                file,
            ]
        );
    }
}
