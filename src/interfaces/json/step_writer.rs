use crate::domain::step::StepEvent;
use crate::error::Result;
use std::io::Write;

/// Writes step events as JSON lines, one event per line.
pub struct StepWriter<W: Write> {
    sink: W,
}

impl<W: Write> StepWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Flushes after every event so a reader sees progress as it happens.
    pub fn write_step(&mut self, event: &StepEvent) -> Result<()> {
        serde_json::to_writer(&mut self.sink, event)?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::step::Step;
    use serde_json::{Value, json};

    #[test]
    fn test_writes_one_line_per_event() {
        let mut writer = StepWriter::new(Vec::new());
        writer
            .write_step(&StepEvent::new(Step::InputValidation).first())
            .unwrap();
        writer
            .write_step(
                &StepEvent::new(Step::ReceivedBackendResponse)
                    .last()
                    .with_data(json!({ "receipt_id": 7 })),
            )
            .unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["name"], "input-validation");
        assert_eq!(lines[0]["first"], true);
        assert_eq!(lines[1]["last"], true);
        assert_eq!(lines[1]["data"]["receipt_id"], 7);
    }
}
