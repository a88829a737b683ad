//! Closed identifier sets for the statistics queries.
//!
//! Column names are never taken from request input directly: a request value
//! is parsed into one of these enums and only the enum decides which column
//! ends up in the SQL text. Everything else is a bound parameter.

/// Drug columns of the `urgente` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drug {
    Canabis,
    Stimulanti,
    Opioide,
    Nsp,
}

impl Drug {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "canabis" => Some(Self::Canabis),
            "stimulanti" => Some(Self::Stimulanti),
            "opioide" => Some(Self::Opioide),
            "nsp" => Some(Self::Nsp),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Canabis => "canabis",
            Self::Stimulanti => "stimulanti",
            Self::Opioide => "opioide",
            Self::Nsp => "nsp",
        }
    }
}

/// Measure columns of the `confiscari` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeizureMeasure {
    Comprimate,
    Grame,
    Doze,
    Mililitri,
    NrCapturi,
}

impl SeizureMeasure {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "comprimate" => Some(Self::Comprimate),
            "grame" => Some(Self::Grame),
            "doze" => Some(Self::Doze),
            "mililitri" => Some(Self::Mililitri),
            "nr_capturi" => Some(Self::NrCapturi),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Comprimate => "comprimate",
            Self::Grame => "grame",
            Self::Doze => "doze",
            Self::Mililitri => "mililitri",
            Self::NrCapturi => "nr_capturi",
        }
    }
}

/// First non-empty candidate wins. The order of the slice is the fixed
/// priority order and is behaviorally significant.
pub fn first_non_empty<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drug_allow_list_is_closed() {
        assert_eq!(Drug::parse("canabis"), Some(Drug::Canabis));
        assert_eq!(Drug::parse("stimulanti"), Some(Drug::Stimulanti));
        assert_eq!(Drug::parse("opioide"), Some(Drug::Opioide));
        assert_eq!(Drug::parse("nsp"), Some(Drug::Nsp));
        assert_eq!(Drug::parse("heroina"), None);
        assert_eq!(Drug::parse("CANABIS"), None);
        assert_eq!(Drug::parse(""), None);
        assert_eq!(Drug::parse("canabis; DROP TABLE urgente"), None);
    }

    #[test]
    fn measure_allow_list_is_closed() {
        assert_eq!(
            SeizureMeasure::parse("comprimate"),
            Some(SeizureMeasure::Comprimate)
        );
        assert_eq!(
            SeizureMeasure::parse("nr_capturi"),
            Some(SeizureMeasure::NrCapturi)
        );
        assert_eq!(SeizureMeasure::parse("kilograme"), None);
        assert_eq!(SeizureMeasure::parse(""), None);
    }

    #[test]
    fn first_non_empty_takes_priority_order() {
        let a = Some("gen".to_string());
        let b = Some("varsta".to_string());
        assert_eq!(first_non_empty(&[&a, &b]), Some("gen"));
        assert_eq!(first_non_empty(&[&None, &b]), Some("varsta"));
    }

    #[test]
    fn first_non_empty_skips_empty_strings() {
        let empty = Some(String::new());
        let set = Some("consum".to_string());
        assert_eq!(first_non_empty(&[&empty, &None, &set]), Some("consum"));
        assert_eq!(first_non_empty(&[&empty, &None]), None);
        assert_eq!(first_non_empty(&[]), None);
    }
}
