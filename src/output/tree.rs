//! Text formatter for a built tree
//!
//! A directory is rendered in two passes: first one line per child, then,
//! for each child directory, a blank line, a `path/name:` header, and that
//! directory's own two passes. Every child of a directory is therefore
//! listed before any of its subdirectories is expanded.

use std::borrow::Cow;
use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::debug;

use crate::tree::{Entry, ListingStatus};

use super::config::OutputConfig;

/// Printed in place of a path prefix that could not be built.
pub const PATH_SENTINEL: &str = "PATHTOOLONG.../";

/// Formatter for the categorized listing.
pub struct TreePrinter {
    config: OutputConfig,
}

impl TreePrinter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render `entry` to a string, without color.
    pub fn format(&self, entry: &Entry) -> String {
        let mut buffer = Buffer::no_color();
        let _ = self.write(entry, &mut buffer);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    /// Print `entry` to stdout. `use_color` forces color; the caller has
    /// already decided whether the terminal wants it.
    pub fn print(&self, entry: &Entry) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write(entry, &mut stdout)?;
        stdout.flush()
    }

    /// Render `entry` into any color-capable writer.
    pub fn write<W: WriteColor>(&self, entry: &Entry, out: &mut W) -> io::Result<()> {
        match entry {
            Entry::Regular { name, size } => write_regular(out, name, *size),
            Entry::Directory {
                name,
                children,
                status,
            } => self.render_directory(out, "", name, children, status),
            Entry::Other { name } => write_other(out, name),
        }
    }

    fn render_directory<W: WriteColor>(
        &self,
        out: &mut W,
        path_prefix: &str,
        dir_name: &str,
        children: &[Entry],
        status: &ListingStatus,
    ) -> io::Result<()> {
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(out, "{}{}:", path_prefix, dir_name)?;
        out.reset()?;
        writeln!(out)?;

        if self.config.show_status {
            write_status(out, status)?;
        }

        for child in children {
            match child {
                Entry::Regular { name, size } => write_regular(out, name, *size)?,
                Entry::Directory { name, .. } => {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
                    write!(out, "{}", name)?;
                    out.reset()?;
                    writeln!(out, " (directory)")?;
                }
                Entry::Other { name } => write_other(out, name)?,
            }
        }

        let mut nested_prefix: Option<Cow<'static, str>> = None;
        for child in children {
            if let Entry::Directory {
                name,
                children,
                status,
            } = child
            {
                let prefix = nested_prefix
                    .get_or_insert_with(|| self.child_prefix(path_prefix, dir_name));
                self.render_directory(out, &**prefix, name, children, status)?;
            }
        }

        Ok(())
    }

    /// `path_prefix + dir_name + "/"`, or the sentinel when that cannot be
    /// built.
    fn child_prefix(&self, path_prefix: &str, dir_name: &str) -> Cow<'static, str> {
        let len = path_prefix.len() + dir_name.len() + 1;
        if self.config.max_path_len.is_some_and(|max| len > max) {
            debug!(len, "path prefix over limit, using sentinel");
            return Cow::Borrowed(PATH_SENTINEL);
        }

        let mut path = String::new();
        if path.try_reserve_exact(len).is_err() {
            debug!(len, "cannot allocate path prefix, using sentinel");
            return Cow::Borrowed(PATH_SENTINEL);
        }
        path.push_str(path_prefix);
        path.push_str(dir_name);
        path.push('/');
        Cow::Owned(path)
    }
}

fn write_regular<W: WriteColor>(out: &mut W, name: &str, size: u64) -> io::Result<()> {
    writeln!(out, "{} (regular, {} Bytes)", name, size)
}

fn write_other<W: WriteColor>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "{} (other)", name)
}

fn write_status<W: WriteColor>(out: &mut W, status: &ListingStatus) -> io::Result<()> {
    let marker = match status {
        ListingStatus::Complete => return Ok(()),
        ListingStatus::Unreadable { reason } => format!("(unreadable: {})", reason),
        ListingStatus::Incomplete { failures } => {
            let noun = if failures.len() == 1 { "entry" } else { "entries" };
            format!("(incomplete: {} {} skipped)", failures.len(), noun)
        }
        ListingStatus::DepthLimited => "(depth limit reached)".to_string(),
    };
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    write!(out, "{}", marker)?;
    out.reset()?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> Entry {
        Entry::Regular {
            name: name.to_string(),
            size,
        }
    }

    fn dir(name: &str, children: Vec<Entry>) -> Entry {
        Entry::Directory {
            name: name.to_string(),
            children,
            status: ListingStatus::Complete,
        }
    }

    fn plain() -> TreePrinter {
        TreePrinter::new(OutputConfig::default())
    }

    #[test]
    fn test_regular_root() {
        assert_eq!(plain().format(&file("a.txt", 5)), "a.txt (regular, 5 Bytes)\n");
    }

    #[test]
    fn test_other_root() {
        let entry = Entry::Other {
            name: "null".to_string(),
        };
        assert_eq!(plain().format(&entry), "null (other)\n");
    }

    #[test]
    fn test_empty_directory() {
        assert_eq!(plain().format(&dir("root", vec![])), "\nroot:\n");
    }

    #[test]
    fn test_file_then_subdirectory() {
        let tree = dir(
            "root",
            vec![file("a.txt", 3), dir("sub", vec![file("b.txt", 0)])],
        );
        assert_eq!(
            plain().format(&tree),
            "\nroot:\n\
             a.txt (regular, 3 Bytes)\n\
             sub (directory)\n\
             \n\
             root/sub:\n\
             b.txt (regular, 0 Bytes)\n"
        );
    }

    #[test]
    fn test_children_listed_before_expansion() {
        let tree = dir(
            "r",
            vec![
                file("f", 1),
                dir("x", vec![dir("deep", vec![])]),
                dir("y", vec![Entry::Other {
                    name: "sock".to_string(),
                }]),
            ],
        );
        assert_eq!(
            plain().format(&tree),
            "\nr:\n\
             f (regular, 1 Bytes)\n\
             x (directory)\n\
             y (directory)\n\
             \n\
             r/x:\n\
             deep (directory)\n\
             \n\
             r/x/deep:\n\
             \n\
             r/y:\n\
             sock (other)\n"
        );
    }

    #[test]
    fn test_root_path_used_verbatim_in_headers() {
        let tree = dir("/tmp/data", vec![dir("logs", vec![])]);
        let output = plain().format(&tree);
        assert!(output.contains("\n/tmp/data:\n"), "{output}");
        assert!(output.contains("\n/tmp/data/logs:\n"), "{output}");
    }

    #[test]
    fn test_unreadable_marker() {
        let tree = Entry::Directory {
            name: "root".to_string(),
            children: vec![],
            status: ListingStatus::Unreadable {
                reason: "permission denied".to_string(),
            },
        };
        assert_eq!(
            plain().format(&tree),
            "\nroot:\n(unreadable: permission denied)\n"
        );
    }

    #[test]
    fn test_incomplete_marker_precedes_children() {
        let tree = Entry::Directory {
            name: "root".to_string(),
            children: vec![file("kept", 1)],
            status: ListingStatus::Incomplete {
                failures: vec!["x".to_string(), "y".to_string()],
            },
        };
        assert_eq!(
            plain().format(&tree),
            "\nroot:\n(incomplete: 2 entries skipped)\nkept (regular, 1 Bytes)\n"
        );
    }

    #[test]
    fn test_depth_limited_marker() {
        let tree = dir(
            "root",
            vec![Entry::Directory {
                name: "deep".to_string(),
                children: vec![],
                status: ListingStatus::DepthLimited,
            }],
        );
        let output = plain().format(&tree);
        assert!(output.ends_with("\nroot/deep:\n(depth limit reached)\n"), "{output}");
    }

    #[test]
    fn test_markers_can_be_hidden() {
        let printer = TreePrinter::new(OutputConfig {
            show_status: false,
            ..Default::default()
        });
        let tree = Entry::Directory {
            name: "root".to_string(),
            children: vec![],
            status: ListingStatus::Unreadable {
                reason: "gone".to_string(),
            },
        };
        assert_eq!(printer.format(&tree), "\nroot:\n");
    }

    #[test]
    fn test_sentinel_when_path_too_long() {
        let printer = TreePrinter::new(OutputConfig {
            max_path_len: Some(8),
            ..Default::default()
        });
        let tree = dir(
            "root",
            vec![dir("abc", vec![dir("defgh", vec![file("z", 2)])])],
        );
        assert_eq!(
            printer.format(&tree),
            "\nroot:\n\
             abc (directory)\n\
             \n\
             root/abc:\n\
             defgh (directory)\n\
             \n\
             PATHTOOLONG.../defgh:\n\
             z (regular, 2 Bytes)\n"
        );
    }

    #[test]
    fn test_color_output_contains_same_text() {
        let printer = TreePrinter::new(OutputConfig {
            use_color: true,
            ..Default::default()
        });
        let mut buffer = Buffer::ansi();
        let tree = dir("root", vec![dir("sub", vec![])]);
        printer.write(&tree, &mut buffer).unwrap();
        let colored = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(colored.contains("\x1b["), "expected escape codes: {colored:?}");
        assert!(colored.contains(" (directory)"));
        assert!(colored.contains("root/sub:"));
    }
}
