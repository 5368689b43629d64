//! Discovery filtering.
//!
//! Which profiles an attendee sees on the browse screen: both sides' stated
//! interest must include the other's gender identity, then the viewer's
//! optional filters (age range, gender, shared interests) narrow the set.

use serde::Deserialize;

use crate::models::profile::{EventProfile, GenderIdentity};

/// Optional filters the viewer applies on top of mutual compatibility.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DiscoveryFilters {
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub gender: Option<GenderIdentity>,
    /// Comma-separated in the query string.
    pub interests: Option<String>,
}

impl DiscoveryFilters {
    fn interest_list(&self) -> Vec<&str> {
        self.interests
            .as_deref()
            .map(|s| s.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }
}

/// Whether two profiles are mutually compatible: each side's preference
/// includes the other's gender identity.
pub fn mutually_interested(viewer: &EventProfile, candidate: &EventProfile) -> bool {
    viewer.interested_in.includes(candidate.gender_identity)
        && candidate.interested_in.includes(viewer.gender_identity)
}

/// Apply mutual compatibility plus the viewer's filters to a candidate set.
///
/// The viewer's own profile is assumed to already be excluded.
pub fn filter_candidates(
    viewer: &EventProfile,
    candidates: Vec<EventProfile>,
    filters: &DiscoveryFilters,
) -> Vec<EventProfile> {
    let wanted_interests = filters.interest_list();

    candidates
        .into_iter()
        .filter(|candidate| {
            if !mutually_interested(viewer, candidate) {
                return false;
            }
            if let Some(min) = filters.age_min {
                if candidate.age < min {
                    return false;
                }
            }
            if let Some(max) = filters.age_max {
                if candidate.age > max {
                    return false;
                }
            }
            if let Some(gender) = filters.gender {
                if candidate.gender_identity != gender {
                    return false;
                }
            }
            if !wanted_interests.is_empty()
                && !candidate
                    .interests
                    .iter()
                    .any(|i| wanted_interests.contains(&i.as_str()))
            {
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::InterestedIn;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(
        name: &str,
        age: i32,
        gender: GenderIdentity,
        interested_in: InterestedIn,
        interests: &[&str],
    ) -> EventProfile {
        EventProfile {
            id: Uuid::new_v4(),
            event_id: Uuid::nil(),
            session_id: format!("s_{}", name),
            first_name: name.to_string(),
            age,
            gender_identity: gender,
            interested_in,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            profile_photo_url: None,
            profile_color: "#2a9d8f".to_string(),
            is_visible: true,
            bio: None,
            height: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_mutual_interest_both_ways() {
        let ana = profile("ana", 27, GenderIdentity::Woman, InterestedIn::Men, &[]);
        let ben = profile("ben", 30, GenderIdentity::Man, InterestedIn::Women, &[]);
        assert!(mutually_interested(&ana, &ben));
        assert!(mutually_interested(&ben, &ana));
    }

    #[test]
    fn test_one_sided_interest_excluded() {
        // Ben is interested in women, but Cleo is interested in women too,
        // so Ben's identity is outside Cleo's preference.
        let ben = profile("ben", 30, GenderIdentity::Man, InterestedIn::Women, &[]);
        let cleo = profile("cleo", 28, GenderIdentity::Woman, InterestedIn::Women, &[]);
        assert!(!mutually_interested(&ben, &cleo));
        assert!(!mutually_interested(&cleo, &ben));
    }

    #[test]
    fn test_everyone_matches_all_identities() {
        let dee = profile("dee", 25, GenderIdentity::NonBinary, InterestedIn::Everyone, &[]);
        let eli = profile("eli", 33, GenderIdentity::Man, InterestedIn::Everyone, &[]);
        assert!(mutually_interested(&dee, &eli));
    }

    #[test]
    fn test_age_range_filter() {
        let viewer = profile("ana", 27, GenderIdentity::Woman, InterestedIn::Everyone, &[]);
        let candidates = vec![
            profile("ben", 22, GenderIdentity::Man, InterestedIn::Everyone, &[]),
            profile("cal", 35, GenderIdentity::Man, InterestedIn::Everyone, &[]),
            profile("dan", 45, GenderIdentity::Man, InterestedIn::Everyone, &[]),
        ];
        let filters = DiscoveryFilters {
            age_min: Some(25),
            age_max: Some(40),
            ..Default::default()
        };
        let result = filter_candidates(&viewer, candidates, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].first_name, "cal");
    }

    #[test]
    fn test_gender_filter() {
        let viewer = profile("ana", 27, GenderIdentity::Woman, InterestedIn::Everyone, &[]);
        let candidates = vec![
            profile("ben", 30, GenderIdentity::Man, InterestedIn::Everyone, &[]),
            profile("fay", 29, GenderIdentity::Woman, InterestedIn::Everyone, &[]),
        ];
        let filters = DiscoveryFilters {
            gender: Some(GenderIdentity::Woman),
            ..Default::default()
        };
        let result = filter_candidates(&viewer, candidates, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].first_name, "fay");
    }

    #[test]
    fn test_shared_interests_filter() {
        let viewer = profile("ana", 27, GenderIdentity::Woman, InterestedIn::Everyone, &[]);
        let candidates = vec![
            profile("ben", 30, GenderIdentity::Man, InterestedIn::Everyone, &["hiking"]),
            profile("cal", 31, GenderIdentity::Man, InterestedIn::Everyone, &["chess", "music"]),
        ];
        let filters = DiscoveryFilters {
            interests: Some("music, food".to_string()),
            ..Default::default()
        };
        let result = filter_candidates(&viewer, candidates, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].first_name, "cal");
    }

    #[test]
    fn test_no_filters_keeps_compatible_set() {
        let viewer = profile("ana", 27, GenderIdentity::Woman, InterestedIn::Men, &[]);
        let candidates = vec![
            profile("ben", 30, GenderIdentity::Man, InterestedIn::Women, &[]),
            profile("fay", 29, GenderIdentity::Woman, InterestedIn::Everyone, &[]),
        ];
        let result = filter_candidates(&viewer, candidates, &DiscoveryFilters::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].first_name, "ben");
    }
}
