//! Line diff between two renderings of a client file.

use std::fmt;

/// Default number of unchanged lines shown around each change.
pub const DEFAULT_CONTEXT: usize = 3;

/// Direction of one diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    /// Present in both versions.
    Keep,
    /// Only in the new version.
    Add,
    /// Only in the old version.
    Remove,
}

impl DiffKind {
    const fn marker(self) -> char {
        match self {
            Self::Keep => ' ',
            Self::Add => '+',
            Self::Remove => '-',
        }
    }
}

/// One line of a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Direction.
    pub kind: DiffKind,
    /// Line text without its terminator.
    pub text: String,
}

/// Structured line diff.
///
/// Holds every line of both versions, tagged; presentation layers decide
/// how to show it. [`ConfigDiff::render_unified`] gives a plain-text form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    lines: Vec<DiffLine>,
}

impl ConfigDiff {
    /// Computes a minimal line diff via longest common subsequence.
    ///
    /// The shared head and tail are matched directly, so the LCS table
    /// only spans the changed middle of the file.
    #[must_use]
    pub fn between(before: &str, after: &str) -> Self {
        let old: Vec<&str> = before.lines().collect();
        let new: Vec<&str> = after.lines().collect();

        let prefix = old
            .iter()
            .zip(&new)
            .take_while(|(left, right)| left == right)
            .count();
        let old_rest = old.get(prefix..).unwrap_or_default();
        let new_rest = new.get(prefix..).unwrap_or_default();
        let suffix = old_rest
            .iter()
            .rev()
            .zip(new_rest.iter().rev())
            .take_while(|(left, right)| left == right)
            .count();
        let old_cut = old_rest.len().saturating_sub(suffix);
        let new_cut = new_rest.len().saturating_sub(suffix);

        let mut lines = Vec::with_capacity(old.len().max(new.len()));
        lines.extend(
            old.iter()
                .take(prefix)
                .map(|text| line(DiffKind::Keep, text)),
        );
        diff_middle(
            old_rest.get(..old_cut).unwrap_or_default(),
            new_rest.get(..new_cut).unwrap_or_default(),
            &mut lines,
        );
        lines.extend(
            old_rest
                .iter()
                .skip(old_cut)
                .map(|text| line(DiffKind::Keep, text)),
        );
        Self { lines }
    }

    /// Returns every line in order.
    #[must_use]
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// Returns whether any line was added or removed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.lines.iter().any(|entry| entry.kind != DiffKind::Keep)
    }

    /// Counts added lines.
    #[must_use]
    pub fn additions(&self) -> usize {
        self.count(DiffKind::Add)
    }

    /// Counts removed lines.
    #[must_use]
    pub fn removals(&self) -> usize {
        self.count(DiffKind::Remove)
    }

    /// Renders `--- before` / `+++ after` text with `@@` hunks, keeping
    /// `context` unchanged lines around each change.
    ///
    /// Returns `No changes` when nothing differs.
    #[must_use]
    pub fn render_unified(&self, context: usize) -> String {
        if !self.has_changes() {
            return "No changes\n".to_owned();
        }

        let numbered = self.numbered();
        let mut output = String::from("--- before\n+++ after\n");
        for (start, end) in self.hunk_ranges(context) {
            let Some(hunk) = numbered.get(start..=end) else {
                continue;
            };
            let (old_start, old_count) = span(hunk, |entry| entry.old, DiffKind::Add);
            let (new_start, new_count) = span(hunk, |entry| entry.new, DiffKind::Remove);
            output.push_str(&format!(
                "@@ -{old_start},{old_count} +{new_start},{new_count} @@\n"
            ));
            for entry in hunk {
                output.push(entry.line.kind.marker());
                output.push_str(&entry.line.text);
                output.push('\n');
            }
        }
        output
    }

    fn count(&self, kind: DiffKind) -> usize {
        self.lines.iter().filter(|entry| entry.kind == kind).count()
    }

    fn numbered(&self) -> Vec<Numbered<'_>> {
        let (mut old, mut new) = (0, 0);
        self.lines
            .iter()
            .map(|entry| {
                let numbered = Numbered {
                    line: entry,
                    old,
                    new,
                };
                match entry.kind {
                    DiffKind::Keep => {
                        old += 1;
                        new += 1;
                    }
                    DiffKind::Remove => old += 1,
                    DiffKind::Add => new += 1,
                }
                numbered
            })
            .collect()
    }

    fn hunk_ranges(&self, context: usize) -> Vec<(usize, usize)> {
        let last = self.lines.len().saturating_sub(1);
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for (position, _) in self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.kind != DiffKind::Keep)
        {
            let start = position.saturating_sub(context);
            let end = position.saturating_add(context).min(last);
            match ranges.last_mut() {
                Some(open) if start <= open.1.saturating_add(1) => open.1 = open.1.max(end),
                _ => ranges.push((start, end)),
            }
        }
        ranges
    }
}

impl fmt::Display for ConfigDiff {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.render_unified(DEFAULT_CONTEXT))
    }
}

struct Numbered<'a> {
    line: &'a DiffLine,
    old: usize,
    new: usize,
}

/// Returns the 1-based start line and length of a hunk on one side.
fn span(hunk: &[Numbered<'_>], side: impl Fn(&Numbered<'_>) -> usize, other: DiffKind) -> (usize, usize) {
    let count = hunk.iter().filter(|entry| entry.line.kind != other).count();
    let first = hunk.first().map_or(0, &side);
    if count == 0 { (first, 0) } else { (first + 1, count) }
}

fn diff_middle(old: &[&str], new: &[&str], lines: &mut Vec<DiffLine>) {
    let table = LcsTable::build(old, new);
    let (mut i, mut j) = (0, 0);
    while let (Some(left), Some(right)) = (old.get(i), new.get(j)) {
        if left == right {
            lines.push(line(DiffKind::Keep, left));
            i += 1;
            j += 1;
        } else if table.at(i + 1, j) >= table.at(i, j + 1) {
            lines.push(line(DiffKind::Remove, left));
            i += 1;
        } else {
            lines.push(line(DiffKind::Add, right));
            j += 1;
        }
    }
    lines.extend(old.iter().skip(i).map(|text| line(DiffKind::Remove, text)));
    lines.extend(new.iter().skip(j).map(|text| line(DiffKind::Add, text)));
}

fn line(kind: DiffKind, text: &str) -> DiffLine {
    DiffLine {
        kind,
        text: text.to_owned(),
    }
}

/// Suffix LCS lengths: `at(i, j)` is the LCS of `old[i..]` and `new[j..]`.
struct LcsTable {
    width: usize,
    cells: Vec<usize>,
}

impl LcsTable {
    fn build(old: &[&str], new: &[&str]) -> Self {
        let width = new.len() + 1;
        let mut table = Self {
            width,
            cells: vec![0; (old.len() + 1) * width],
        };
        for (i, left) in old.iter().enumerate().rev() {
            for (j, right) in new.iter().enumerate().rev() {
                let value = if left == right {
                    table.at(i + 1, j + 1) + 1
                } else {
                    table.at(i + 1, j).max(table.at(i, j + 1))
                };
                if let Some(cell) = table.cells.get_mut(i * width + j) {
                    *cell = value;
                }
            }
        }
        table
    }

    fn at(&self, i: usize, j: usize) -> usize {
        self.cells.get(i * self.width + j).copied().unwrap_or(0)
    }
}
