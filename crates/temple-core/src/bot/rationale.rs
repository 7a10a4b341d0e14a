use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreasureOutlook {
    Carrying(u32),
    Moderate,
    Little,
}

impl TreasureOutlook {
    pub fn from_value(round_value: u32) -> Self {
        if round_value > 15 {
            TreasureOutlook::Carrying(round_value)
        } else if round_value > 5 {
            TreasureOutlook::Moderate
        } else {
            TreasureOutlook::Little
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardExposure {
    None,
    One,
    Some,
    Many,
}

impl HazardExposure {
    pub fn from_singles(single_sightings: usize) -> Self {
        match single_sightings {
            0 => HazardExposure::None,
            1 => HazardExposure::One,
            2 => HazardExposure::Some,
            _ => HazardExposure::Many,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crowding {
    Few,
    Moderate,
    Crowded,
}

impl Crowding {
    pub fn from_players(players_remaining: usize) -> Self {
        match players_remaining {
            0..=2 => Crowding::Few,
            3 => Crowding::Moderate,
            _ => Crowding::Crowded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temperament {
    Bold,
    Cautious,
    Balanced,
}

impl Temperament {
    pub fn from_risk_tolerance(risk_tolerance: f64) -> Self {
        if risk_tolerance > 0.6 {
            Temperament::Bold
        } else if risk_tolerance < 0.4 {
            Temperament::Cautious
        } else {
            Temperament::Balanced
        }
    }
}

/// Human-readable explanation attached to an automated decision. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rationale {
    pub treasure: TreasureOutlook,
    pub hazards: HazardExposure,
    pub crowding: Crowding,
    pub temperament: Temperament,
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        match self.treasure {
            TreasureOutlook::Carrying(value) => write!(f, "carrying {value} treasure")?,
            TreasureOutlook::Moderate => f.write_str("moderate treasure secured")?,
            TreasureOutlook::Little => f.write_str("little treasure so far")?,
        }
        f.write_str(match self.hazards {
            HazardExposure::Many => ", many single hazards seen (risky!)",
            HazardExposure::Some => ", some hazards revealed",
            HazardExposure::One => ", one hazard seen",
            HazardExposure::None => ", no hazards yet",
        })?;
        f.write_str(match self.crowding {
            Crowding::Few => ", few players left (good treasure share)",
            Crowding::Moderate => ", moderate competition",
            Crowding::Crowded => ", crowded temple",
        })?;
        f.write_str(match self.temperament {
            Temperament::Bold => ", bold nature",
            Temperament::Cautious => ", cautious approach",
            Temperament::Balanced => ", balanced strategy",
        })?;
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_follow_thresholds() {
        assert_eq!(TreasureOutlook::from_value(16), TreasureOutlook::Carrying(16));
        assert_eq!(TreasureOutlook::from_value(15), TreasureOutlook::Moderate);
        assert_eq!(TreasureOutlook::from_value(5), TreasureOutlook::Little);
        assert_eq!(HazardExposure::from_singles(4), HazardExposure::Many);
        assert_eq!(Crowding::from_players(2), Crowding::Few);
        assert_eq!(Crowding::from_players(5), Crowding::Crowded);
        assert_eq!(Temperament::from_risk_tolerance(0.6), Temperament::Balanced);
        assert_eq!(Temperament::from_risk_tolerance(0.35), Temperament::Cautious);
    }

    #[test]
    fn display_joins_all_four_parts() {
        let rationale = Rationale {
            treasure: TreasureOutlook::Carrying(18),
            hazards: HazardExposure::One,
            crowding: Crowding::Moderate,
            temperament: Temperament::Bold,
        };
        assert_eq!(
            rationale.to_string(),
            "(carrying 18 treasure, one hazard seen, moderate competition, bold nature)"
        );
    }
}
