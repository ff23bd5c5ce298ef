//! Emission markers and their display identifiers.

/// Owner-supplied emission: a domain-space position plus optional marble content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmissionInput {
    pub x: f64,
    pub label: Option<String>,
}

impl EmissionInput {
    pub fn new(x: f64) -> Self {
        Self { x, label: None }
    }

    pub fn labeled(x: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            label: Some(label.into()),
        }
    }
}

/// An emission stamped with the identifier it keeps for the lifetime of the
/// sequence it was stamped from.
#[derive(Clone, Debug, PartialEq)]
pub struct Emission {
    pub id: usize,
    pub x: f64,
    pub label: Option<String>,
}

/// Assign each input its position in the sequence as identifier.
pub fn stamp_emissions(inputs: &[EmissionInput]) -> Vec<Emission> {
    inputs
        .iter()
        .enumerate()
        .map(|(id, input)| Emission {
            id,
            x: input.x,
            label: input.label.clone(),
        })
        .collect()
}

/// Copy of `emissions` with the marker identified by `id` moved to `x`.
///
/// Unknown identifiers leave the sequence unchanged.
pub fn with_x(emissions: &[Emission], id: usize, x: f64) -> Vec<Emission> {
    emissions
        .iter()
        .map(|emission| {
            if emission.id == id {
                Emission {
                    x,
                    ..emission.clone()
                }
            } else {
                emission.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamping_uses_sequence_position() {
        let inputs = vec![
            EmissionInput::labeled(40.0, "a"),
            EmissionInput::new(10.0),
            EmissionInput::labeled(25.0, "c"),
        ];
        let stamped = stamp_emissions(&inputs);

        let ids: Vec<usize> = stamped.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        // Identifiers follow input order, not x order
        assert_eq!(stamped[1].x, 10.0);
        assert_eq!(stamped[2].label.as_deref(), Some("c"));
    }

    #[test]
    fn stamping_empty_sequence() {
        assert!(stamp_emissions(&[]).is_empty());
    }

    #[test]
    fn with_x_moves_only_the_matching_marker() {
        let stamped = stamp_emissions(&[EmissionInput::new(1.0), EmissionInput::new(2.0)]);
        let moved = with_x(&stamped, 1, 42.0);

        assert_eq!(moved[0], stamped[0]);
        assert_eq!(moved[1].x, 42.0);
        assert_eq!(moved[1].id, 1);
    }

    #[test]
    fn with_x_ignores_unknown_ids() {
        let stamped = stamp_emissions(&[EmissionInput::new(1.0)]);
        assert_eq!(with_x(&stamped, 7, 3.0), stamped);
    }
}
