use crate::trial::Challenge;

/// Total rotational travel over a challenge: the sum of the Euclidean norms
/// of each keypress's rotational delta. Keypresses without a rotation record
/// contribute zero.
pub fn challenge_rot_travel(challenge: &Challenge) -> f64 {
    challenge
        .keypresses
        .iter()
        .filter_map(|kp| kp.travel.and_then(|t| t.rot))
        .map(|rot| rot.iter().map(|k| k * k).sum::<f64>().sqrt())
        .sum()
}
