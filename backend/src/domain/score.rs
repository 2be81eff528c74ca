//! Deterministic penalty-based trust scoring.
//!
//! Pure function over one [`FeatureVector`] snapshot: no I/O, no clock, no
//! ordering effects. Rules are independent and additive — several can stack
//! on the same request — and the result is deliberately unclamped.

use super::features::FeatureVector;

/// Score every account starts from before penalties apply.
pub const BASELINE: i32 = 100;

/// Compute the trust score for an aggregated feature vector.
///
/// A non-public profile scores 0 outright. Every other rule is evaluated
/// against the same snapshot and each triggered penalty is subtracted.
pub fn trust_score(features: &FeatureVector) -> i32 {
    if !features.visible {
        return 0;
    }

    let mut score = BASELINE;

    // Low level combined with little playtime reads as a throwaway account.
    if features.level < 5 && features.total_hours < 500 {
        score -= 5;
    }
    if features.total_hours < 1000 {
        score -= 20;
    }
    if features.level < 5 && features.game_count > 0 && features.game_count <= 2 {
        score -= 5;
    }
    if features.game_count == 0 {
        score -= 10;
    }

    // Social graph.
    if features.friend_count <= 10 {
        score -= 5;
    }
    if features.friend_ban_ratio == 0.0 {
        score -= 10;
    }
    if features.friend_ban_ratio > 0.0 {
        score -= 5;
    }
    if features.friend_ban_ratio > 0.06 {
        score -= 5;
    }

    // Account age.
    if features.account_age_days < 365 {
        score -= 5;
    }

    // Linux playtime.
    if features.linux_hours != 0 {
        score -= 5;
    }
    if features.linux_ratio > 0.1 {
        score -= 5;
    }

    // Ban history.
    if features.vac_banned {
        score -= 10;
    }
    if features.vac_ban_count >= 2 {
        score -= 10 * i32::try_from(features.vac_ban_count - 1).unwrap_or(i32::MAX / 10);
    }

    // Comment sentiment.
    if features.sentiment <= -1.0 {
        score -= 3;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A vector that triggers no penalty at all.
    fn spotless() -> FeatureVector {
        FeatureVector {
            visible: true,
            account_age_days: 4000,
            level: 30,
            game_count: 50,
            friend_count: 100,
            friend_ban_ratio: 0.01,
            total_hours: 2000,
            linux_hours: 0,
            linux_ratio: 0.0,
            vac_banned: false,
            vac_ban_count: 0,
            sentiment: 0.2,
        }
    }

    #[test]
    fn spotless_vector_loses_only_the_nonzero_ratio_penalty() {
        // friend_ban_ratio of 0.01 still trips the "> 0" rule; everything
        // else in the fixture is clean.
        assert_eq!(trust_score(&spotless()), BASELINE - 5);
    }

    #[test]
    fn hidden_profile_scores_zero_regardless_of_other_fields() {
        let mut features = spotless();
        features.visible = false;
        features.vac_banned = true;
        features.vac_ban_count = 9;
        features.total_hours = 0;
        assert_eq!(trust_score(&features), 0);
    }

    #[test]
    fn worked_example_scores_fifty() {
        let features = FeatureVector {
            visible: true,
            account_age_days: 4244,
            level: 13,
            game_count: 0,
            friend_count: 47,
            friend_ban_ratio: 0.1489,
            total_hours: 0,
            linux_hours: 0,
            linux_ratio: 0.0,
            vac_banned: true,
            vac_ban_count: 1,
            sentiment: -0.0068,
        };
        // 100 - 20 (hours) - 10 (no games) - 5 (ratio > 0) - 5 (ratio > 0.06)
        //     - 10 (banned)
        assert_eq!(trust_score(&features), 50);
    }

    #[test]
    fn empty_friend_list_sentinel_trips_both_ratio_rules_only() {
        let mut features = spotless();
        features.friend_ban_ratio = 1.0;
        // 1.0 is > 0 and > 0.06, but not == 0, so exactly -10 from the two
        // ratio rules relative to a zero-ratio-free baseline.
        assert_eq!(trust_score(&features), BASELINE - 10);
    }

    #[test]
    fn zero_ratio_trips_the_falsy_rule_instead() {
        let mut features = spotless();
        features.friend_ban_ratio = 0.0;
        assert_eq!(trust_score(&features), BASELINE - 10);
    }

    #[test]
    fn rules_are_independently_additive() {
        let base = trust_score(&spotless());

        let mut one = spotless();
        one.account_age_days = 100;
        assert_eq!(trust_score(&one), base - 5);

        let mut two = spotless();
        two.friend_count = 3;
        assert_eq!(trust_score(&two), base - 5);

        let mut three = spotless();
        three.linux_hours = 12;
        assert_eq!(trust_score(&three), base - 5);

        let mut four = spotless();
        four.vac_banned = true;
        assert_eq!(trust_score(&four), base - 10);

        let mut five = spotless();
        five.sentiment = -1.0;
        assert_eq!(trust_score(&five), base - 3);

        let mut stacked = spotless();
        stacked.account_age_days = 100;
        stacked.friend_count = 3;
        stacked.linux_hours = 12;
        stacked.vac_banned = true;
        stacked.sentiment = -1.0;
        assert_eq!(trust_score(&stacked), base - 5 - 5 - 5 - 10 - 3);
    }

    #[test]
    fn repeated_bans_scale_linearly() {
        let mut features = spotless();
        features.vac_banned = true;
        features.vac_ban_count = 4;
        // -10 for the ban flag, -10 * (4 - 1) for the repeat count.
        assert_eq!(trust_score(&features), BASELINE - 5 - 10 - 30);
    }

    #[test]
    fn new_low_level_account_stacks_starter_penalties() {
        let mut features = spotless();
        features.level = 2;
        features.total_hours = 100;
        features.game_count = 1;
        // level<5 & hours<500, hours<1000, level<5 & 0<games<=2.
        assert_eq!(trust_score(&features), BASELINE - 5 - 5 - 20 - 5);
    }

    #[test]
    fn score_may_fall_below_zero() {
        let features = FeatureVector {
            visible: true,
            account_age_days: 10,
            level: 1,
            game_count: 0,
            friend_count: 0,
            friend_ban_ratio: 1.0,
            total_hours: 0,
            linux_hours: 20,
            linux_ratio: 1.0,
            vac_banned: true,
            vac_ban_count: 6,
            sentiment: -1.0,
        };
        assert!(trust_score(&features) < 0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let features = spotless();
        assert_eq!(trust_score(&features), trust_score(&features.clone()));
    }
}
