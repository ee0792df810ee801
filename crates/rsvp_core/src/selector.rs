use shared::domain::GuestKey;

/// One entry offered by the search widget.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOption {
    pub value: GuestKey,
    pub label: String,
    /// Household key carried along as auxiliary metadata.
    pub household: String,
}

/// Capability contract for the searchable dropdown. Implementations own the
/// actual widget; the core only pushes options in, and change notifications
/// come back through `RsvpClient::on_select` with the raw chosen value.
pub trait SearchableSelector: Send {
    /// Replaces the option list wholesale. Implementations are expected to
    /// tear down and reinitialize the underlying widget.
    fn populate(&mut self, options: &[SelectorOption]);

    fn dispose(&mut self);
}

/// Null selector for environments without a search widget.
pub struct MissingSelector;

impl SearchableSelector for MissingSelector {
    fn populate(&mut self, _options: &[SelectorOption]) {}

    fn dispose(&mut self) {}
}
