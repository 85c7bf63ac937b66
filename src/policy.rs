use std::collections::BTreeSet;

/// Which context-data (MDC) entries are captured as record attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextDataSelection {
    /// Capture every entry, excluding keys reserved by this crate.
    All,
    /// Capture only the named keys. The default is the empty set, which
    /// captures nothing.
    Keys(BTreeSet<String>),
}

impl Default for ContextDataSelection {
    fn default() -> Self {
        ContextDataSelection::Keys(BTreeSet::new())
    }
}

impl ContextDataSelection {
    /// Parses a comma-separated key list from host configuration.
    ///
    /// `None` parses to the empty selection. Entries are trimmed and empty
    /// entries dropped. The singleton list `"*"` selects all entries; a
    /// `"*"` mixed with other keys is treated as a literal key name.
    pub fn parse(input: Option<&str>) -> Self {
        let keys: BTreeSet<String> = match input {
            None => BTreeSet::new(),
            Some(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        };
        if keys.len() == 1 && keys.contains("*") {
            ContextDataSelection::All
        } else {
            ContextDataSelection::Keys(keys)
        }
    }

    /// Whether the given context-data key is selected for capture.
    pub fn includes(&self, key: &str) -> bool {
        match self {
            ContextDataSelection::All => true,
            ContextDataSelection::Keys(keys) => keys.contains(key),
        }
    }

    /// Whether the selection captures nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            ContextDataSelection::All => false,
            ContextDataSelection::Keys(keys) => keys.is_empty(),
        }
    }
}

/// Immutable capture configuration, fixed at appender construction.
///
/// Each flag independently gates one mapping rule of
/// [`map_event`](crate::map_event); all default to off. With every flag
/// off the mapped record carries only severity, logger name, timestamp
/// and the rendered message body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturePolicy {
    /// Capture the source-code location (file, line, function, namespace).
    pub code_location: bool,
    /// Capture thread name and id. Experimental attributes.
    pub thread_attrs: bool,
    /// Capture the event's marker/category name.
    pub marker_attr: bool,
    /// Capture structured key-value pairs attached to the event.
    pub key_value_pair_attrs: bool,
    /// Capture logger shared-context properties.
    pub logger_context_attrs: bool,
    /// Capture positional format arguments, numbered.
    pub argument_attrs: bool,
    /// Capture map-shaped payload entries; the payload's `message` entry
    /// replaces the rendered template as the record body.
    pub structured_argument_attrs: bool,
    /// Surface the reserved `event.name` context-data entry as the record's
    /// event name.
    pub event_name: bool,
    /// Which context-data entries become attributes.
    pub context_data: ContextDataSelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_input_parses_to_empty_set() {
        assert_eq!(
            ContextDataSelection::parse(None),
            ContextDataSelection::Keys(BTreeSet::new())
        );
        assert!(ContextDataSelection::parse(None).is_empty());
    }

    #[test]
    fn empty_string_parses_to_empty_set() {
        let selection = ContextDataSelection::parse(Some(""));
        assert!(selection.is_empty());
        assert!(!selection.includes("anything"));
    }

    #[test]
    fn entries_are_trimmed_and_empties_dropped() {
        let selection = ContextDataSelection::parse(Some("a, b ,,c"));
        let expected: BTreeSet<String> =
            ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(selection, ContextDataSelection::Keys(expected));
    }

    #[test]
    fn lone_star_selects_all() {
        let selection = ContextDataSelection::parse(Some("*"));
        assert_eq!(selection, ContextDataSelection::All);
        assert!(selection.includes("anything"));
    }

    #[test]
    fn padded_star_selects_all() {
        assert_eq!(
            ContextDataSelection::parse(Some("  *  ")),
            ContextDataSelection::All
        );
    }

    #[test]
    fn star_mixed_with_keys_is_literal() {
        let selection = ContextDataSelection::parse(Some("a,*"));
        assert!(selection.includes("a"));
        assert!(selection.includes("*"));
        assert!(!selection.includes("b"));
    }

    #[test]
    fn explicit_keys_select_only_those_keys() {
        let selection = ContextDataSelection::parse(Some("userId"));
        assert!(selection.includes("userId"));
        assert!(!selection.includes("tenant"));
    }
}
