//! Viewfinder matching for image and video modes

use tracing::debug;

use crate::aspect::AspectClass;
use crate::resolution::{Resolution, parse_resolution};
use crate::selector::{BestMode, offer};
use crate::types::{CaptureGroup, CaptureType, ScreenGeometry};

/// Find the viewfinder mode to preview `target` with
///
/// Candidates come from every viewfinder group in `groups`, must fit the
/// screen in both dimensions and must share the target's aspect class. The
/// largest qualifying mode wins (later modes win area ties).
/// Returns None if no viewfinder mode qualifies.
pub fn find_best_viewfinder(
    target: &Resolution,
    groups: &[CaptureGroup],
    screen: ScreenGeometry,
) -> Option<Resolution> {
    let aspect = AspectClass::of(target);
    let mut best: Option<BestMode> = None;

    let candidates = groups
        .iter()
        .filter(|g| g.capture_type == CaptureType::Viewfinder)
        .flat_map(|g| g.resolutions.iter());

    for token in candidates {
        let candidate = match parse_resolution(token) {
            Ok(candidate) => candidate,
            Err(e) => {
                debug!(error = %e, "Ignoring malformed viewfinder token");
                continue;
            }
        };

        if !screen.fits(candidate.width, candidate.height) {
            continue;
        }
        if AspectClass::of(&candidate) != aspect {
            continue;
        }

        if offer(&mut best, &candidate, 0) {
            debug!(target_mode = %target, viewfinder = %candidate.base(), "Viewfinder candidate taken");
        }
    }

    best.map(|b| b.resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(viewfinder: &[&str]) -> Vec<CaptureGroup> {
        vec![
            CaptureGroup::new(
                "image-resolutions",
                vec!["2592x1944".to_string(), "1920x1080".to_string()],
            ),
            CaptureGroup::new(
                "viewfinder-resolutions",
                viewfinder.iter().map(|s| s.to_string()).collect(),
            ),
        ]
    }

    const PORTRAIT: ScreenGeometry = ScreenGeometry { width: 1080, height: 1920 };

    #[test]
    fn test_rejects_modes_larger_than_screen() {
        let groups = groups(&["2560x1440", "640x480"]);

        let four_three = find_best_viewfinder(&Resolution::new(2592, 1944), &groups, PORTRAIT);
        assert_eq!(four_three, Some(Resolution::new(640, 480)));

        // 2560x1440 is the only 16:9 mode and exceeds the screen's long side
        let sixteen_nine = find_best_viewfinder(&Resolution::new(1920, 1080), &groups, PORTRAIT);
        assert_eq!(sixteen_nine, None);
    }

    #[test]
    fn test_picks_largest_fitting_mode_of_target_aspect() {
        let groups = groups(&[
            "640x480",
            "1280x720@30/1",
            "1440x1080",
            "1920x1080@15/1-30/1",
            "800x600",
        ]);

        assert_eq!(
            find_best_viewfinder(&Resolution::new(1920, 1080), &groups, PORTRAIT),
            Some(Resolution::new(1920, 1080))
        );
        assert_eq!(
            find_best_viewfinder(&Resolution::new(2592, 1944), &groups, PORTRAIT),
            Some(Resolution::new(1440, 1080))
        );
    }

    #[test]
    fn test_other_aspect_matches_same_ratio_only() {
        let groups = groups(&["1280x1024", "640x480", "1000x1000"]);
        assert_eq!(
            find_best_viewfinder(&Resolution::new(2560, 2048), &groups, PORTRAIT),
            Some(Resolution::new(1280, 1024))
        );
    }

    #[test]
    fn test_no_viewfinder_group() {
        let groups = vec![CaptureGroup::new("image-resolutions", vec!["640x480".to_string()])];
        assert_eq!(find_best_viewfinder(&Resolution::new(640, 480), &groups, PORTRAIT), None);
    }

    #[test]
    fn test_malformed_candidates_ignored() {
        let groups = groups(&["640x480@x/1", "320x240"]);
        assert_eq!(
            find_best_viewfinder(&Resolution::new(640, 480), &groups, PORTRAIT),
            Some(Resolution::new(320, 240))
        );
    }
}
