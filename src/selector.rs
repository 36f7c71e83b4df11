//! Best mode selection per (camera, capture type, aspect class) bucket
//!
//! Each capture group is folded in enumeration order. Within a group a
//! candidate replaces the bucket's current holder when its area is at least
//! as large as the group's running best and its frame rate does not regress.
//! The area and frame rate guard starts over with every group, so the first
//! qualifying mode of a later group always takes the bucket. Frame rate only
//! takes part for video; other capture types compete on area alone.

use tracing::{debug, warn};

use crate::aspect::AspectClass;
use crate::constants::placeholder::{
    ASPECT_16_9_SUFFIX, ASPECT_4_3_SUFFIX, DELIMITER, FRAME_RATE_TAIL, IMAGE_TAG,
    RESOLUTION_TAIL, VIDEO_TAG, VIEWFINDER_TAG,
};
use crate::resolution::{Resolution, parse_resolution};
use crate::types::{Camera, CaptureType, ScreenGeometry};

/// Current holder of a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMode {
    /// Winning mode, frame rate stripped
    pub resolution: Resolution,
    pub area: u64,
    pub frame_rate: u32,
}

/// Offer a candidate to a bucket
/// Returns true if the candidate became the new holder
pub fn offer(best: &mut Option<BestMode>, resolution: &Resolution, frame_rate: u32) -> bool {
    let area = resolution.area();
    let replace = best
        .as_ref()
        .map_or(true, |b| area >= b.area && frame_rate >= b.frame_rate);

    if replace {
        *best = Some(BestMode {
            resolution: resolution.base(),
            area,
            frame_rate,
        });
    }
    replace
}

/// Identity of a bucket within one camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketKey {
    /// Uppercased first three characters of the camera label
    pub camera: String,
    pub capture_type: CaptureType,
    /// None for video, which is always 16:9
    pub aspect: Option<AspectClass>,
}

impl BucketKey {
    fn prefix(&self) -> String {
        let tag = match self.capture_type {
            CaptureType::Viewfinder => VIEWFINDER_TAG,
            CaptureType::Image => IMAGE_TAG,
            CaptureType::Video => VIDEO_TAG,
            CaptureType::Unknown => "",
        };
        format!("{DELIMITER}{}{tag}", self.camera)
    }

    /// e.g. `@PRIIMAGE43RES@`, `@PRIVIDEORES@`
    pub fn resolution_placeholder(&self) -> String {
        let suffix = match self.aspect {
            Some(AspectClass::FourThree) => ASPECT_4_3_SUFFIX,
            Some(AspectClass::SixteenNine) => ASPECT_16_9_SUFFIX,
            _ => "",
        };
        format!("{}{suffix}{RESOLUTION_TAIL}", self.prefix())
    }

    /// e.g. `@PRIVIDEOFPS@`; only video buckets carry a frame rate
    pub fn frame_rate_placeholder(&self) -> Option<String> {
        (self.capture_type == CaptureType::Video)
            .then(|| format!("{}{FRAME_RATE_TAIL}", self.prefix()))
    }
}

/// A bucket and its winner, if any candidate qualified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub key: BucketKey,
    pub best: Option<BestMode>,
}

/// Buckets of one camera in the order they were first expected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraSelection {
    pub buckets: Vec<Bucket>,
}

impl CameraSelection {
    fn register(&mut self, key: BucketKey) {
        if !self.buckets.iter().any(|b| b.key == key) {
            self.buckets.push(Bucket { key, best: None });
        }
    }

    fn slot(&mut self, key: &BucketKey) -> Option<&mut Option<BestMode>> {
        self.buckets
            .iter_mut()
            .find(|b| &b.key == key)
            .map(|b| &mut b.best)
    }

    fn contains(&self, key: &BucketKey) -> bool {
        self.buckets.iter().any(|b| &b.key == key)
    }

    /// Buckets that ended up without a holder
    pub fn unresolved(&self) -> impl Iterator<Item = &BucketKey> {
        self.buckets
            .iter()
            .filter(|b| b.best.is_none())
            .map(|b| &b.key)
    }

    pub fn get(&self, key: &BucketKey) -> Option<&BestMode> {
        self.buckets
            .iter()
            .find(|b| &b.key == key)
            .and_then(|b| b.best.as_ref())
    }
}

/// Bucket aspects a capture type is expected to fill
fn expected_aspects(capture_type: CaptureType) -> &'static [Option<AspectClass>] {
    match capture_type {
        CaptureType::Viewfinder | CaptureType::Image => {
            &[Some(AspectClass::FourThree), Some(AspectClass::SixteenNine)]
        }
        CaptureType::Video => &[None],
        CaptureType::Unknown => &[],
    }
}

/// Which bucket aspect a mode belongs to, or None if the capture type drops it
fn bucket_aspect(capture_type: CaptureType, aspect: AspectClass) -> Option<Option<AspectClass>> {
    match (capture_type, aspect) {
        (CaptureType::Video, AspectClass::SixteenNine) => Some(None),
        (CaptureType::Video, _) => None,
        (_, AspectClass::FourThree | AspectClass::SixteenNine) => Some(Some(aspect)),
        (_, AspectClass::Other { .. }) => None,
    }
}

/// Running best of one group, per bucket aspect
#[derive(Debug, Default)]
struct GroupGuard {
    entries: Vec<(Option<AspectClass>, Option<BestMode>)>,
}

impl GroupGuard {
    fn entry(&mut self, aspect: Option<AspectClass>) -> &mut Option<BestMode> {
        let pos = match self.entries.iter().position(|(a, _)| *a == aspect) {
            Some(pos) => pos,
            None => {
                self.entries.push((aspect, None));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }
}

/// Pick the best mode for every bucket of one camera
///
/// Viewfinder modes must fit the screen in both dimensions. Video modes need
/// a frame rate. Unknown and empty groups are skipped. A later group of the
/// same capture type overrides the holder with its own best mode.
pub fn select_best_modes(camera: &Camera, screen: ScreenGeometry) -> CameraSelection {
    let camera_key = camera.placeholder_key();
    let mut selection = CameraSelection::default();

    for group in &camera.groups {
        if group.capture_type == CaptureType::Unknown {
            debug!(camera = %camera.label, group = %group.label, "Skipping unknown resolution type");
            continue;
        }
        if group.resolutions.is_empty() {
            warn!(camera = %camera.label, group = %group.label, "No resolutions in group: configuration gap");
            continue;
        }

        for aspect in expected_aspects(group.capture_type) {
            selection.register(BucketKey {
                camera: camera_key.clone(),
                capture_type: group.capture_type,
                aspect: *aspect,
            });
        }

        let mut guard = GroupGuard::default();
        let mut rejected = 0usize;
        for token in &group.resolutions {
            let resolution = match parse_resolution(token) {
                Ok(resolution) => resolution,
                Err(e) => {
                    debug!(camera = %camera.label, group = %group.label, error = %e, "Dropping resolution token");
                    rejected += 1;
                    continue;
                }
            };

            if group.capture_type == CaptureType::Viewfinder
                && !screen.fits(resolution.width, resolution.height)
            {
                continue;
            }

            let Some(aspect) = bucket_aspect(group.capture_type, AspectClass::of(&resolution))
            else {
                continue;
            };

            let frame_rate = if group.capture_type == CaptureType::Video {
                match resolution.frame_rate() {
                    Some(rate) => rate,
                    None => {
                        debug!(camera = %camera.label, token = %token, "Video resolution without frame rate, skipping");
                        continue;
                    }
                }
            } else {
                0
            };

            let key = BucketKey {
                camera: camera_key.clone(),
                capture_type: group.capture_type,
                aspect,
            };
            if !selection.contains(&key) {
                continue;
            }
            let running = guard.entry(aspect);
            if offer(running, &resolution, frame_rate)
                && let Some(slot) = selection.slot(&key)
            {
                *slot = *running;
                debug!(
                    camera = %camera.label,
                    key = %key.resolution_placeholder(),
                    resolution = %resolution.base(),
                    frame_rate,
                    "New bucket holder"
                );
            }
        }

        if rejected > 0 {
            warn!(camera = %camera.label, group = %group.label, rejected, "Dropped malformed resolution tokens");
        }
    }

    selection
}
