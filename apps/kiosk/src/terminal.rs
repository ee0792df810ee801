use rsvp_core::{
    flow::{AcknowledgmentSurface, Navigator},
    selector::{SearchableSelector, SelectorOption},
};

/// Line-mode stand-in for the searchable dropdown: prints the option list
/// and leaves lookup to the operator typing a guest id.
#[derive(Default)]
pub struct TerminalSelector {
    options: Vec<SelectorOption>,
}

impl SearchableSelector for TerminalSelector {
    fn populate(&mut self, options: &[SelectorOption]) {
        self.options = options.to_vec();
        println!("{} convidados disponíveis:", self.options.len());
        for option in &self.options {
            println!("  {} [{}] ({})", option.label, option.value, option.household);
        }
    }

    fn dispose(&mut self) {
        self.options.clear();
    }
}

pub struct TerminalAcknowledgment;

impl AcknowledgmentSurface for TerminalAcknowledgment {
    fn reveal(&self) -> bool {
        println!("Confirmação enviada com sucesso! Digite 'ok' para voltar ao início.");
        true
    }
}

pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate_home(&self) {
        println!("Voltando para a página inicial.");
    }
}
