use std::{
    ffi::OsStr,
    io::{self, Write},
    os::unix::ffi::OsStrExt,
};

use comfy_table::{CellAlignment, Table, presets};

use crate::{
    color::Palette,
    pathlist::{self, Entry},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub kept: usize,
    pub filtered: usize,
    pub duplicates: usize,
    pub undefined: usize,
}

impl Summary {
    pub fn tally(entries: &[Entry], exclude_undefined: bool) -> Self {
        let mut summary = Self::default();
        for Entry { class, .. } in entries {
            if class.duplicate {
                summary.duplicates += 1;
            }
            if !class.exists {
                summary.undefined += 1;
            }
            if class.filtered(exclude_undefined) {
                summary.filtered += 1;
            }
            if class.kept() {
                summary.kept += 1;
            }
        }
        summary
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::NOTHING); // No borders or dividers.
        for (label, n) in [
            ("Num Kept", self.kept),
            ("Num Filtered", self.filtered),
            ("Num Duplicates", self.duplicates),
            ("Num Undefined", self.undefined),
        ] {
            table.add_row(vec![
                label.to_string(),
                ":".to_string(),
                n.to_string(),
            ]);
        }
        if let Some(column) = table.column_mut(2) {
            column.set_cell_alignment(CellAlignment::Right);
        }
        table
    }
}

/// Components are written as raw bytes, exactly as they were read.
fn write_component<W: Write>(out: &mut W, comp: &OsStr) -> io::Result<()> {
    out.write_all(comp.as_bytes())
}

/// Annotated listing of every entry, a legend and the counters. Nothing is
/// filtered.
#[tracing::instrument(skip(out, entries, palette))]
pub fn report<W: Write>(
    out: &mut W,
    name: &str,
    entries: &[Entry],
    exclude_undefined: bool,
    palette: &Palette,
) -> io::Result<Summary> {
    writeln!(out, "Name: {name}")?;
    for (i, Entry { component, class }) in entries.iter().enumerate() {
        let dup = class.dup_marker().to_string();
        let dup = if class.duplicate {
            palette.bad(&dup)
        } else {
            palette.good(&dup)
        };
        let exists = class.exists_marker().to_string();
        let exists = if class.exists {
            palette.good(&exists)
        } else {
            palette.missing(&exists)
        };
        write!(out, "{:>4} {dup}{exists} ", i + 1)?;
        write_component(out, component)?;
        writeln!(out)?;
    }

    let (u, d, e, n) = (
        palette.good("u"),
        palette.bad("d"),
        palette.good("e"),
        palette.missing("n"),
    );
    writeln!(out)?;
    writeln!(out, "Key:")?;
    writeln!(out, "     {u}{e}   unique, exists")?;
    writeln!(out, "     {d}{e}   duplicate, exists")?;
    writeln!(out, "     {u}{n}   unique, does not exist")?;
    writeln!(out, "     {d}{n}   duplicate, does not exist")?;

    let summary = Summary::tally(entries, exclude_undefined);
    writeln!(out)?;
    writeln!(out, "Summary:")?;
    for line in summary.table().lines() {
        writeln!(out, "   {}", line.trim_end())?;
    }
    tracing::debug!(?summary, "Reported.");
    Ok(summary)
}

/// Original components, numbered, untouched.
pub fn list<W: Write>(out: &mut W, components: &[&OsStr]) -> io::Result<()> {
    for (i, comp) in components.iter().enumerate() {
        write!(out, "{:>2} ", i + 1)?;
        write_component(out, comp)?;
        writeln!(out)?;
    }
    Ok(())
}

/// One line, ready for `VAR=$(...)`.
pub fn shell<W: Write>(out: &mut W, components: &[&OsStr]) -> io::Result<()> {
    write_component(out, &pathlist::join(components))?;
    writeln!(out)
}
