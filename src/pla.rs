//! PLA (Programmable Logic Array) format support
//!
//! This module reads single-output PLA truth tables into a [`PlaProblem`]
//! (an onset, an offset and variable labels) and writes minimized covers back
//! as PLA text through [`PlaCover`].
//!
//! Rows are classified by their output character: `1` (or `4`) puts the row in
//! the onset, `0` (or `3`) in the offset, and `-`, `~` or `2` rows are
//! don't-cares and are dropped. A `-` in the input part stands for both values,
//! so the row is expanded into every minterm it matches.

pub mod error;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

pub use error::{PLAError, PLAReadError, PLAWriteError};

use crate::error::MinimizeError;
use crate::term::{ConflictReport, DataSet, Polarity, Term, TermSet, VariableLabels};

/// Largest number of `-` inputs in a single row that will be expanded
pub const MAX_EXPANDED_DONT_CARES: usize = 16;

const DEFAULT_OUTPUT_LABEL: &str = "f";

/// Trait for types that can be parsed from PLA text
///
/// `from_pla_string` and `from_pla_file` delegate to `from_pla_reader`.
pub trait PLAReader: Sized {
    /// Parse from any buffered reader
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PLAReadError>;

    /// Parse from a PLA format string
    ///
    /// # Examples
    ///
    /// ```
    /// use boom_logic::pla::PLAReader;
    /// use boom_logic::PlaProblem;
    ///
    /// let pla = ".i 2\n.o 1\n11 1\n10 1\n00 0\n.e\n";
    /// let problem = PlaProblem::from_pla_string(pla).unwrap();
    /// assert_eq!(problem.n_variables(), 2);
    /// assert_eq!(problem.onset().len(), 2);
    /// assert_eq!(problem.offset().len(), 1);
    /// ```
    fn from_pla_string(s: &str) -> Result<Self, PLAReadError> {
        Self::from_pla_reader(Cursor::new(s.as_bytes()))
    }

    /// Load from a PLA file
    fn from_pla_file<P: AsRef<Path>>(path: P) -> Result<Self, PLAReadError> {
        let file = File::open(path)?;
        Self::from_pla_reader(BufReader::new(file))
    }
}

/// Trait for types that can be written as PLA text
///
/// `to_pla_string` and `to_pla_file` delegate to `write_pla`.
pub trait PLAWriter {
    /// Write PLA text to any writer
    fn write_pla<W: Write>(&self, writer: &mut W) -> Result<(), PLAWriteError>;

    /// Render as a PLA string
    fn to_pla_string(&self) -> Result<String, PLAWriteError> {
        let mut buffer = Vec::new();
        self.write_pla(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| PLAWriteError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Write to a PLA file without building the whole string first
    fn to_pla_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PLAWriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pla(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// A single-output minimization problem read from a PLA truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaProblem {
    labels: VariableLabels,
    output_label: Arc<str>,
    onset: DataSet,
    offset: DataSet,
}

impl PlaProblem {
    /// Create a problem from explicit sets
    ///
    /// Labels are backfilled with generated names if fewer than the number of
    /// variables are given.
    ///
    /// # Errors
    ///
    /// [`MinimizeError::DimensionMismatch`] if the onset and offset disagree on
    /// the number of variables.
    pub fn new(
        mut labels: VariableLabels,
        output_label: impl AsRef<str>,
        onset: DataSet,
        offset: DataSet,
    ) -> Result<Self, MinimizeError> {
        if onset.n_variables() != offset.n_variables() {
            return Err(MinimizeError::DimensionMismatch {
                expected: onset.n_variables(),
                actual: offset.n_variables(),
            });
        }
        labels.backfill_to(onset.n_variables());
        Ok(PlaProblem {
            labels,
            output_label: Arc::from(output_label.as_ref()),
            onset,
            offset,
        })
    }

    /// Number of input variables
    pub fn n_variables(&self) -> usize {
        self.onset.n_variables()
    }

    /// Input variable labels
    pub fn labels(&self) -> &VariableLabels {
        &self.labels
    }

    /// Output label
    pub fn output_label(&self) -> &str {
        &self.output_label
    }

    pub fn onset(&self) -> &DataSet {
        &self.onset
    }

    pub fn offset(&self) -> &DataSet {
        &self.offset
    }

    /// Resolve rows that appear with both output values
    ///
    /// See [`DataSet::resolve_conflicts`].
    pub fn clean(&self) -> Result<(PlaProblem, ConflictReport), MinimizeError> {
        let (onset, offset, report) = DataSet::resolve_conflicts(&self.onset, &self.offset)?;
        let cleaned = PlaProblem {
            labels: self.labels.clone(),
            output_label: Arc::clone(&self.output_label),
            onset,
            offset,
        };
        Ok((cleaned, report))
    }

    /// Pair a cover of this problem with its labels for writing
    pub fn cover(&self, cover: TermSet) -> PlaCover {
        PlaCover {
            n_variables: self.n_variables(),
            labels: self.labels.clone(),
            output_label: Arc::clone(&self.output_label),
            cover,
        }
    }
}

/// A minimized cover ready to be written as a `.type f` PLA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaCover {
    n_variables: usize,
    labels: VariableLabels,
    output_label: Arc<str>,
    cover: TermSet,
}

impl PlaCover {
    /// Create from a cover and labels; missing labels are generated
    pub fn new(
        n_variables: usize,
        mut labels: VariableLabels,
        output_label: impl AsRef<str>,
        cover: TermSet,
    ) -> Self {
        labels.backfill_to(n_variables);
        PlaCover {
            n_variables,
            labels,
            output_label: Arc::from(output_label.as_ref()),
            cover,
        }
    }

    pub fn terms(&self) -> &TermSet {
        &self.cover
    }
}

fn write_header<W: Write>(
    writer: &mut W,
    n_variables: usize,
    labels: &VariableLabels,
    output_label: &str,
) -> io::Result<()> {
    writeln!(writer, ".i {}", n_variables)?;
    if n_variables > 0 {
        write!(writer, ".ilb")?;
        for label in labels.as_slice().iter().take(n_variables) {
            write!(writer, " {}", label)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, ".o 1")?;
    writeln!(writer, ".ob {}", output_label)
}

fn write_row<W: Write>(
    writer: &mut W,
    term: &Term,
    n_variables: usize,
    output: char,
) -> io::Result<()> {
    for variable in 0..n_variables {
        let c = match term.polarity_of(variable) {
            Some(Polarity::Normal) => '1',
            Some(Polarity::Complement) => '0',
            None => '-',
        };
        write!(writer, "{}", c)?;
    }
    writeln!(writer, " {}", output)
}

impl PLAWriter for PlaCover {
    fn write_pla<W: Write>(&self, writer: &mut W) -> Result<(), PLAWriteError> {
        writeln!(writer, ".type f")?;
        write_header(writer, self.n_variables, &self.labels, &self.output_label)?;
        writeln!(writer, ".p {}", self.cover.len())?;
        for term in &self.cover {
            write_row(writer, term, self.n_variables, '1')?;
        }
        writeln!(writer, ".e")?;
        Ok(())
    }
}

/// Writes the explicit truth table: onset rows with output `1`, offset rows with `0`
impl PLAWriter for PlaProblem {
    fn write_pla<W: Write>(&self, writer: &mut W) -> Result<(), PLAWriteError> {
        let n = self.n_variables();
        writeln!(writer, ".type fr")?;
        write_header(writer, n, &self.labels, &self.output_label)?;
        writeln!(writer, ".p {}", self.onset.len() + self.offset.len())?;
        for minterm in &self.onset {
            write_row(writer, minterm, n, '1')?;
        }
        for minterm in &self.offset {
            write_row(writer, minterm, n, '0')?;
        }
        writeln!(writer, ".end")?;
        Ok(())
    }
}

/// Which set a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowClass {
    On,
    Off,
    DontCare,
}

fn parse_count(directive: &str, value: Option<&&str>) -> Result<usize, PLAError> {
    value
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| PLAError::InvalidCount {
            directive: Arc::from(directive),
            value: Arc::from(value.copied().unwrap_or("")),
        })
}

fn parse_inputs(input: &str, line: usize) -> Result<Vec<Option<bool>>, PLAError> {
    input
        .chars()
        .enumerate()
        .map(|(position, character)| match character {
            '0' => Ok(Some(false)),
            '1' => Ok(Some(true)),
            '-' | '~' | 'x' | 'X' => Ok(None),
            _ => Err(PLAError::InvalidInputCharacter {
                line,
                character,
                position,
            }),
        })
        .collect()
}

fn parse_output(output: &str, line: usize) -> Result<RowClass, PLAError> {
    let mut chars = output.chars();
    match (chars.next(), chars.next()) {
        (Some(character), None) => match character {
            '1' | '4' => Ok(RowClass::On),
            '0' | '3' => Ok(RowClass::Off),
            '-' | '~' | '2' => Ok(RowClass::DontCare),
            _ => Err(PLAError::InvalidOutputCharacter { line, character }),
        },
        _ => Err(PLAError::UnsupportedOutputCount {
            count: output.chars().count(),
        }),
    }
}

/// Every minterm matched by a row with `-` positions
fn expand_row(inputs: &[Option<bool>], line: usize) -> Result<Vec<Vec<bool>>, PLAError> {
    let free: Vec<usize> = inputs
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_none())
        .map(|(i, _)| i)
        .collect();
    if free.len() > MAX_EXPANDED_DONT_CARES {
        return Err(PLAError::TooManyDontCares {
            line,
            count: free.len(),
            limit: MAX_EXPANDED_DONT_CARES,
        });
    }

    let base: Vec<bool> = inputs.iter().map(|value| value.unwrap_or(false)).collect();
    let mut rows = Vec::with_capacity(1 << free.len());
    for mask in 0..(1usize << free.len()) {
        let mut row = base.clone();
        for (bit, &position) in free.iter().enumerate() {
            row[position] = mask >> bit & 1 == 1;
        }
        rows.push(row);
    }
    Ok(rows)
}

impl PLAReader for PlaProblem {
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PLAReadError> {
        let mut num_inputs: Option<usize> = None;
        let mut input_labels: Option<Vec<Arc<str>>> = None;
        let mut output_label: Option<Arc<str>> = None;
        let mut onset_rows: Vec<Vec<bool>> = Vec::new();
        let mut offset_rows: Vec<Vec<bool>> = Vec::new();
        let mut ignored = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('.') {
                let parts: Vec<&str> = line.split_whitespace().collect();
                match parts.first().copied() {
                    Some(".i") => {
                        num_inputs = Some(parse_count(".i", parts.get(1))?);
                    }
                    Some(".o") => {
                        let count = parse_count(".o", parts.get(1))?;
                        if count != 1 {
                            return Err(PLAError::UnsupportedOutputCount { count }.into());
                        }
                    }
                    Some(".ilb") => {
                        let labels: Vec<Arc<str>> =
                            parts.iter().skip(1).map(|s| Arc::from(*s)).collect();
                        if !labels.is_empty() {
                            input_labels = Some(labels);
                        }
                    }
                    Some(".ob") => {
                        let labels = &parts[1..];
                        if labels.len() > 1 {
                            return Err(PLAError::UnsupportedOutputCount {
                                count: labels.len(),
                            }
                            .into());
                        }
                        output_label = labels.first().map(|s| Arc::from(*s));
                    }
                    Some(".e") | Some(".end") => break,
                    // .type, .p and unknown directives carry nothing we need
                    _ => {}
                }
                continue;
            }

            // Rows are "inputs output", optionally with a | separator or
            // column spacing inside the input part
            let (input_str, output_str): (String, String) = match num_inputs {
                Some(ni) => {
                    let packed: Vec<char> = line
                        .chars()
                        .filter(|c| !c.is_whitespace() && *c != '|')
                        .collect();
                    if packed.len() != ni + 1 {
                        return Err(PLAError::RowWidthMismatch {
                            line: line_no,
                            expected: ni,
                            actual: packed.len().saturating_sub(1),
                        }
                        .into());
                    }
                    let (inp, out) = packed.split_at(ni);
                    (inp.iter().collect(), out.iter().collect())
                }
                None => {
                    let parts: Vec<&str> = line
                        .split(|c: char| c.is_whitespace() || c == '|')
                        .filter(|s| !s.is_empty())
                        .collect();
                    match parts.as_slice() {
                        [inp, out] => (inp.to_string(), out.to_string()),
                        [] | [_] => {
                            return Err(PLAError::MissingOutput { line: line_no }.into())
                        }
                        [_, outputs @ ..] => {
                            return Err(PLAError::UnsupportedOutputCount {
                                count: outputs.iter().map(|s| s.chars().count()).sum(),
                            }
                            .into())
                        }
                    }
                }
            };

            // Infer the input count from the first row if not declared
            num_inputs.get_or_insert(input_str.chars().count());
            let inputs = parse_inputs(&input_str, line_no)?;
            match parse_output(&output_str, line_no)? {
                RowClass::On => onset_rows.extend(expand_row(&inputs, line_no)?),
                RowClass::Off => offset_rows.extend(expand_row(&inputs, line_no)?),
                RowClass::DontCare => ignored += 1,
            }
        }

        let ni = num_inputs.ok_or(PLAError::MissingDimensions)?;
        let labels = match input_labels {
            Some(labels) if labels.len() != ni => {
                return Err(PLAError::InputLabelMismatch {
                    expected: ni,
                    actual: labels.len(),
                }
                .into())
            }
            Some(labels) => VariableLabels::from_labels(&labels),
            None => VariableLabels::new(ni),
        };

        let onset = DataSet::from_rows(ni, &onset_rows)?;
        let offset = DataSet::from_rows(ni, &offset_rows)?;
        debug!(
            inputs = ni,
            onset = onset.len(),
            offset = offset.len(),
            ignored,
            "read PLA table"
        );
        Ok(PlaProblem {
            labels,
            output_label: output_label.unwrap_or_else(|| Arc::from(DEFAULT_OUTPUT_LABEL)),
            onset,
            offset,
        })
    }
}
