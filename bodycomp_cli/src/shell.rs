//! Interactive prompt loop.
//!
//! Generic over its input and output so the binary can drive it with
//! stdin/stdout and tests can feed it scripted answers.

use bodycomp_core::input::{parse_age, parse_gender, parse_measure};
use bodycomp_core::{
    compute_metrics, CsvRecordStore, Gender, Measurement, MetricResult, RawMeasurement, Result,
};
use std::io::{BufRead, Write};

const RULE_WIDTH: usize = 35;

/// What happened while collecting one entry
enum Entry {
    Ready(Measurement),
    Rejected(&'static str),
    EndOfInput,
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    store: CsvRecordStore,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, store: CsvRecordStore) -> Self {
        Self {
            input,
            output,
            store,
        }
    }

    /// Run until the user types `exit` or input ends
    pub fn run(&mut self) -> Result<()> {
        self.banner()?;

        loop {
            writeln!(self.output, "\n--- New Entry ---")?;
            let name = match self.prompt("Enter Name (or type 'exit' to quit): ")? {
                Some(name) => name,
                None => break,
            };
            if name.eq_ignore_ascii_case("exit") {
                writeln!(self.output, "Exiting program. Stay healthy!")?;
                break;
            }

            let measurement = match self.read_entry(name)? {
                Entry::Ready(measurement) => measurement,
                Entry::Rejected(message) => {
                    writeln!(self.output, "{}", message)?;
                    continue;
                }
                Entry::EndOfInput => break,
            };

            let result = compute_metrics(&measurement);
            self.show_result(&measurement, &result)?;

            let answer = self.prompt("Do you want to save this result? (y/n): ")?;
            if answer.map_or(false, |a| a.eq_ignore_ascii_case("y")) {
                let outcome = self.store.save_record(&measurement, &result);
                let tag = if outcome.success { "Success" } else { "Error" };
                writeln!(self.output, "\n[{}] {}", tag, outcome.message)?;
            }
        }

        Ok(())
    }

    fn banner(&mut self) -> Result<()> {
        let rule = "=".repeat(60);
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "      COMPREHENSIVE HEALTH TRACKER (U.S. NAVY METHOD)")?;
        writeln!(self.output, "      (Requires: Weight, Height, Waist, Neck, Hip)")?;
        writeln!(self.output, "{}", rule)?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Collect one entry field by field, then build it with `RawMeasurement::parse`
    ///
    /// Numbers are checked as they are typed so a bad value stops the entry
    /// right away; positivity is left to the final parse.
    fn read_entry(&mut self, name: String) -> Result<Entry> {
        const NOT_NUMERIC: &str = "Invalid Input! Please enter numeric values.";
        const NOT_POSITIVE: &str = "Error: Inputs must be positive numbers!";

        let mut raw = RawMeasurement {
            name,
            ..RawMeasurement::default()
        };

        let Some(age) = self.prompt("Enter Age: ")? else {
            return Ok(Entry::EndOfInput);
        };
        if parse_age(&age).is_err() {
            return Ok(Entry::Rejected(NOT_NUMERIC));
        }
        raw.age = age;

        let gender = loop {
            let Some(text) = self.prompt("Enter Gender (M/F): ")? else {
                return Ok(Entry::EndOfInput);
            };
            match parse_gender(&text) {
                Ok(gender) => {
                    raw.gender = text;
                    break gender;
                }
                Err(_) => writeln!(
                    self.output,
                    "Invalid gender. Please enter 'M' for Male or 'F' for Female."
                )?,
            }
        };

        let mut fields = vec![
            ("Weight", "Enter Weight (in kg): "),
            ("Height", "Enter Height (in cm): "),
            ("Neck", "Enter Neck Circumference (in cm): "),
            ("Waist", "Enter Waist Circumference (in cm): "),
        ];
        if gender == Gender::Female {
            fields.push(("Hip", "Enter Hip Circumference (in cm): "));
        }

        let mut answers = Vec::with_capacity(fields.len());
        for (field, text) in fields {
            let Some(answer) = self.prompt(text)? else {
                return Ok(Entry::EndOfInput);
            };
            if parse_measure(field, &answer).is_err() {
                return Ok(Entry::Rejected(NOT_NUMERIC));
            }
            answers.push(answer);
        }

        let mut answers = answers.into_iter();
        raw.weight = answers.next().unwrap_or_default();
        raw.height = answers.next().unwrap_or_default();
        raw.neck = answers.next().unwrap_or_default();
        raw.waist = answers.next().unwrap_or_default();
        raw.hip = answers.next();

        match raw.parse() {
            Ok(measurement) => Ok(Entry::Ready(measurement)),
            Err(_) => Ok(Entry::Rejected(NOT_POSITIVE)),
        }
    }

    fn show_result(&mut self, measurement: &Measurement, result: &MetricResult) -> Result<()> {
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "Results for {}:", measurement.name)?;
        writeln!(self.output, "  > BMI Score      : {}", result.bmi)?;
        writeln!(
            self.output,
            "  > Body Fat %     : {}% (U.S. Navy Method)",
            result.body_fat_percent
        )?;
        writeln!(self.output, "  > Health Category: {}", result.category)?;
        writeln!(self.output, "{}", rule)?;
        Ok(())
    }
}
