use rand::Rng;

/// Azure accepts styledegree values in this range.
pub const MIN_STYLE_DEGREE: f64 = 0.01;
pub const MAX_STYLE_DEGREE: f64 = 2.0;

const RATE_JITTER: f64 = 0.04;
const PITCH_JITTER: f64 = 0.5;

/// Per-sentence prosody decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ProsodyPlan {
    /// Integer percentage deviation from the 1.0 baseline rate.
    pub rate_percent: i32,
    /// Pitch offset in semitones, rendered with one decimal in SSML.
    pub pitch_semitones: f64,
    pub style_degree: f64,
}

/// Rate multiplier and semitone shift applied for each expressive style.
fn style_adjustment(style: &str) -> (f64, f64) {
    match style {
        "empathetic" => (0.98, 0.1),
        "sad" => (0.96, -0.2),
        "cheerful" => (1.02, 0.3),
        "calm" => (0.97, 0.0),
        _ => (1.0, 0.0),
    }
}

fn default_style_degree(style: &str) -> f64 {
    match style {
        "empathetic" => 1.3,
        "sad" => 1.1,
        "calm" => 1.2,
        "cheerful" => 1.4,
        _ => 1.2,
    }
}

/// Compute a jittered prosody plan for one sentence.
///
/// Every call draws fresh randomness from the injected source so repeated
/// sentences do not sound identical. The jitter is ±4% on rate and ±0.5
/// semitones on pitch around the style-adjusted base values.
pub fn plan<R: Rng>(
    rng: &mut R,
    base_rate: f64,
    base_semitones: f64,
    style: &str,
    requested_degree: Option<f64>,
) -> ProsodyPlan {
    let (rate_mult, pitch_shift) = style_adjustment(style);

    let rate = base_rate * rate_mult * (1.0 + rng.gen_range(-RATE_JITTER..=RATE_JITTER));
    let pitch = base_semitones + pitch_shift + rng.gen_range(-PITCH_JITTER..=PITCH_JITTER);

    let style_degree = match requested_degree {
        Some(degree) => degree.clamp(MIN_STYLE_DEGREE, MAX_STYLE_DEGREE),
        None => default_style_degree(style),
    };

    ProsodyPlan {
        rate_percent: ((rate - 1.0) * 100.0) as i32,
        pitch_semitones: pitch,
        style_degree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_plan_rate_stays_within_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        // base 0.95 with the empathetic multiplier 0.98 gives a center of
        // 0.931; the ±4% jitter keeps the rate inside [0.8938, 0.9682],
        // i.e. percentages inside [-11, -3].
        for _ in 0..1000 {
            let plan = plan(&mut rng, 0.95, 0.5, "empathetic", None);
            assert!(
                plan.rate_percent >= -11 && plan.rate_percent <= -3,
                "rate_percent {} out of bounds",
                plan.rate_percent
            );
        }
    }

    #[test]
    fn test_plan_pitch_stays_within_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        // base 0.5 plus the cheerful +0.3 shift, jittered ±0.5.
        for _ in 0..1000 {
            let plan = plan(&mut rng, 0.95, 0.5, "cheerful", None);
            assert!(
                plan.pitch_semitones >= 0.3 - 1e-9 && plan.pitch_semitones <= 1.3 + 1e-9,
                "pitch {} out of bounds",
                plan.pitch_semitones
            );
        }
    }

    #[test]
    fn test_plan_unknown_style_has_no_adjustment() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let plan = plan(&mut rng, 1.0, 0.0, "robotic", None);
            // rate 1.0 ± 4% truncates to [-4, 4]
            assert!(plan.rate_percent >= -4 && plan.rate_percent <= 4);
            assert!(plan.pitch_semitones >= -0.5 && plan.pitch_semitones <= 0.5);
            assert_eq!(plan.style_degree, 1.2);
        }
    }

    #[test]
    fn test_plan_fresh_randomness_per_call() {
        let mut rng = StdRng::seed_from_u64(42);
        let plans: Vec<ProsodyPlan> = (0..20)
            .map(|_| plan(&mut rng, 0.95, 0.5, "empathetic", None))
            .collect();
        assert!(
            plans.iter().any(|p| p.pitch_semitones != plans[0].pitch_semitones),
            "expected varying pitch across calls"
        );
    }

    #[test]
    fn test_style_degree_defaults() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "empathetic", None).style_degree, 1.3);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "sad", None).style_degree, 1.1);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "calm", None).style_degree, 1.2);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "cheerful", None).style_degree, 1.4);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "surprised", None).style_degree, 1.2);
    }

    #[test]
    fn test_style_degree_clamped_into_valid_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "sad", Some(-3.0)).style_degree, MIN_STYLE_DEGREE);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "sad", Some(0.0)).style_degree, MIN_STYLE_DEGREE);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "sad", Some(5.0)).style_degree, MAX_STYLE_DEGREE);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "sad", Some(1.5)).style_degree, 1.5);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "sad", Some(2.0)).style_degree, 2.0);
        assert_eq!(plan(&mut rng, 1.0, 0.0, "sad", Some(0.01)).style_degree, 0.01);
    }

    #[test]
    fn test_rate_percent_truncates_toward_zero() {
        // With zero jitter width we can't force an exact fraction through
        // the RNG, so check the truncation arithmetic directly.
        assert_eq!(((1.019_f64 - 1.0) * 100.0) as i32, 1);
        assert_eq!(((0.981_f64 - 1.0) * 100.0) as i32, -1);
    }
}
