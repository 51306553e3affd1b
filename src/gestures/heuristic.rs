// Heuristic (rule-based) finger counter
// Counts raised fingers from relative tip/joint positions plus a thumb orientation test

use crate::landmarks::{index, Point3, LANDMARK_COUNT};

/// Tip landmarks of the four non-thumb fingers
const FINGER_TIPS: [usize; 4] = [
    index::INDEX_FINGER_TIP,
    index::MIDDLE_FINGER_TIP,
    index::RING_FINGER_TIP,
    index::PINKY_TIP,
];

/// Proximal joints matching [`FINGER_TIPS`]
const FINGER_PIPS: [usize; 4] = [
    index::INDEX_FINGER_PIP,
    index::MIDDLE_FINGER_PIP,
    index::RING_FINGER_PIP,
    index::PINKY_PIP,
];

/// Count raised fingers, in [0, 5]
///
/// Works on raw or normalized points: translation and positive uniform
/// scale preserve every comparison made here.
pub fn count_fingers(points: &[Point3; LANDMARK_COUNT]) -> u8 {
    let mut fingers_up = 0;

    if thumb_up(points) {
        fingers_up += 1;
    }

    for (&tip, &pip) in FINGER_TIPS.iter().zip(FINGER_PIPS.iter()) {
        // Image y grows downward, so a raised tip has the smaller y
        if points[tip].y < points[pip].y {
            fingers_up += 1;
        }
    }

    fingers_up
}

/// Thumb test along the horizontal axis
///
/// Hand orientation comes from the wrist relative to the thumb MCP. With the
/// wrist to the left of the MCP the thumb is up when its tip is left of the
/// IP joint, otherwise when it is right of it.
pub fn thumb_up(points: &[Point3; LANDMARK_COUNT]) -> bool {
    let wrist = points[index::WRIST];
    let mcp = points[index::THUMB_MCP];
    let ip = points[index::THUMB_IP];
    let tip = points[index::THUMB_TIP];

    if wrist.x < mcp.x {
        tip.x < ip.x
    } else {
        tip.x > ip.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fist, open_hand, two_finger_hand};

    #[test]
    fn test_two_fingers() {
        assert_eq!(count_fingers(two_finger_hand().points()), 2);
    }

    #[test]
    fn test_open_hand() {
        assert_eq!(count_fingers(open_hand().points()), 5);
    }

    #[test]
    fn test_fist() {
        assert_eq!(count_fingers(fist().points()), 0);
    }

    #[test]
    fn test_thumb_orientation_mirrors() {
        // Mirror the open hand horizontally: the thumb test must flip with it
        let mut mirrored = *open_hand().points();
        for p in mirrored.iter_mut() {
            p.x = 1.0 - p.x;
        }
        assert!(thumb_up(&mirrored));
        assert_eq!(count_fingers(&mirrored), 5);
    }

    #[test]
    fn test_thumb_closed_in_two_finger_pose() {
        assert!(!thumb_up(two_finger_hand().points()));
    }
}
