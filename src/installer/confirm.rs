use crate::ui;

/// Source of yes/no decisions for install offers
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Ask the operator on the terminal
pub struct ConsolePrompt;

impl Confirm for ConsolePrompt {
    fn confirm(&mut self, question: &str) -> bool {
        ui::prompt_yes_no(question)
    }
}

/// Answer every question with "yes" (`--yes`)
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, question: &str) -> bool {
        ui::info(&format!("{} yes", question));
        true
    }
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}
