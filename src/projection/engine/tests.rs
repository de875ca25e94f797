//! Unit tests for the projection heuristic

use super::*;
use crate::scoring::{compile, ScoringRule, ScoringSystem};

#[cfg(test)]
mod projection_tests {
    use super::*;

    const SEASON: Season = Season(2024);

    fn history(points: &[f64]) -> Vec<WeeklyPoints> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| WeeklyPoints::new(SEASON, Week::new(i as u16 + 1), *p))
            .collect()
    }

    fn input(position: Position, points: &[f64]) -> ProjectionInput {
        ProjectionInput::new(PlayerId::new("00-0036389"), position, SEASON)
            .with_history(history(points))
    }

    #[test]
    fn test_starter_active_scenario() {
        let config = ProjectionConfig::default();
        let result = project(&input(Position::WR, &[18.0, 18.0, 18.0, 18.0]), Week::new(5), &config)
            .unwrap();

        assert!((result.basis.recency_average - 18.0).abs() < 1e-9);
        assert_eq!(result.basis.role_multiplier, 1.0);
        assert_eq!(result.basis.injury_multiplier, 1.0);
        assert!((result.projected_points - 18.0).abs() < 1e-9);
        assert_eq!(result.confidence, 1.0);
        assert!(!result.basis.used_baseline);
        assert_eq!(result.basis.usage_multiplier, 1.0);
        assert_eq!(result.basis.matchup_multiplier, 1.0);
    }

    #[test]
    fn test_third_string_questionable_scenario() {
        let config = ProjectionConfig::default();
        let player = input(Position::RB, &[10.0, 10.0, 10.0, 10.0])
            .with_depth_chart_order(3)
            .with_injury_status(InjuryStatus::Questionable);

        let result = project(&player, Week::new(5), &config).unwrap();

        assert!((result.basis.role_multiplier - 0.36).abs() < 1e-9);
        assert_eq!(result.basis.injury_multiplier, 0.85);
        assert!((result.projected_points - 3.06).abs() < 1e-9);
        assert!((result.confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_recency_weights_favor_recent_games() {
        let config = ProjectionConfig::default();
        let result = project(&input(Position::WR, &[0.0, 0.0, 0.0, 10.0]), Week::new(5), &config)
            .unwrap();

        let weights: Vec<f64> = result.basis.weeks.iter().map(|w| w.weight).collect();
        assert_eq!(weights, vec![0.1, 0.2, 0.3, 0.4]);
        assert!((result.projected_points - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_last_window_games_used() {
        let config = ProjectionConfig::default();
        let result = project(
            &input(Position::TE, &[50.0, 50.0, 6.0, 6.0, 6.0, 6.0]),
            Week::new(7),
            &config,
        )
        .unwrap();

        assert_eq!(result.basis.weeks.len(), 4);
        assert_eq!(result.basis.weeks[0].week, Week::new(3));
        assert!((result.projected_points - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_history_reweights_available_games() {
        let config = ProjectionConfig::default();
        let result = project(&input(Position::QB, &[12.0, 24.0]), Week::new(3), &config).unwrap();

        let total_weight: f64 = result.basis.weeks.iter().map(|w| w.weight).sum();
        assert!((total_weight - 1.0).abs() < 1e-12);
        // weights 1/3 and 2/3
        assert!((result.projected_points - 20.0).abs() < 1e-9);
        assert!((result.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_kicker_uses_uniform_weights() {
        let config = ProjectionConfig::default();
        let result = project(&input(Position::K, &[4.0, 8.0, 12.0, 16.0]), Week::new(5), &config)
            .unwrap();

        assert!(result.basis.weeks.iter().all(|w| (w.weight - 0.25).abs() < 1e-12));
        assert!((result.projected_points - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_unsorted_history_is_ordered_before_weighting() {
        let config = ProjectionConfig::default();
        let mut player = input(Position::WR, &[]);
        player.history = vec![
            WeeklyPoints::new(SEASON, Week::new(4), 10.0),
            WeeklyPoints::new(SEASON, Week::new(1), 0.0),
            WeeklyPoints::new(SEASON, Week::new(3), 0.0),
            WeeklyPoints::new(SEASON, Week::new(2), 0.0),
        ];

        let result = project(&player, Week::new(5), &config).unwrap();
        assert!((result.projected_points - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_history_falls_back_to_baseline() {
        let config = ProjectionConfig::default();
        let player = input(Position::RB, &[]).with_replacement_baseline(7.5);

        let result = project(&player, Week::new(1), &config).unwrap();

        assert!(result.basis.used_baseline);
        assert!(result.basis.weeks.is_empty());
        assert_eq!(result.projected_points, 7.5);
        assert_eq!(result.confidence, config.confidence_floor);
    }

    #[test]
    fn test_baseline_still_adjusted_for_role_and_injury() {
        let config = ProjectionConfig::default();
        let player = input(Position::RB, &[])
            .with_replacement_baseline(10.0)
            .with_depth_chart_order(2)
            .with_injury_status(InjuryStatus::Questionable);

        let result = project(&player, Week::new(1), &config).unwrap();
        assert!((result.projected_points - 5.1).abs() < 1e-9);
    }

    #[test]
    fn test_out_and_ir_project_zero() {
        let config = ProjectionConfig::default();
        for status in [InjuryStatus::Out, InjuryStatus::IR] {
            let player = input(Position::WR, &[-3.0, 25.0, 31.0]).with_injury_status(status);
            let result = project(&player, Week::new(4), &config).unwrap();

            assert_eq!(result.projected_points, 0.0);
            assert!(result.projected_points.is_sign_positive());
            assert_eq!(result.basis.injury_multiplier, 0.0);
        }
    }

    #[test]
    fn test_rank_strictly_decreases_projection() {
        let config = ProjectionConfig::default();
        let projections: Vec<f64> = (1..=5)
            .map(|rank| {
                let player = input(Position::RB, &[9.0, 14.0, 11.0]).with_depth_chart_order(rank);
                project(&player, Week::new(4), &config).unwrap().projected_points
            })
            .collect();

        for pair in projections.windows(2) {
            assert!(pair[0] > pair[1], "{:?}", projections);
        }
    }

    #[test]
    fn test_confidence_penalties_stack_and_floor() {
        let config = ProjectionConfig {
            low_data_penalty: 0.4,
            injury_penalty: 0.4,
            depth_penalty: 0.4,
            ..Default::default()
        };
        let player = input(Position::TE, &[5.0])
            .with_depth_chart_order(4)
            .with_injury_status(InjuryStatus::Questionable);

        let result = project(&player, Week::new(2), &config).unwrap();
        assert_eq!(result.confidence, config.confidence_floor);
    }

    #[test]
    fn test_depth_penalty_only_beyond_threshold() {
        let config = ProjectionConfig::default();
        let full = [8.0, 8.0, 8.0, 8.0];

        let at_threshold = project(
            &input(Position::WR, &full).with_depth_chart_order(3),
            Week::new(5),
            &config,
        )
        .unwrap();
        let beyond = project(
            &input(Position::WR, &full).with_depth_chart_order(4),
            Week::new(5),
            &config,
        )
        .unwrap();

        assert_eq!(at_threshold.confidence, 1.0);
        assert!((beyond.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_prior_season_history_is_allowed() {
        let config = ProjectionConfig::default();
        let player = ProjectionInput::new(PlayerId::new("p"), Position::QB, Season::new(2025))
            .with_history(vec![
                WeeklyPoints::new(Season::new(2024), Week::new(17), 20.0),
                WeeklyPoints::new(Season::new(2024), Week::new(18), 22.0),
            ]);

        let result = project(&player, Week::new(1), &config).unwrap();
        assert_eq!(result.basis.weeks.len(), 2);
    }

    #[test]
    fn test_target_week_not_in_future_rejected() {
        let config = ProjectionConfig::default();
        let player = input(Position::WR, &[10.0, 12.0, 9.0]);

        let same = project(&player, Week::new(3), &config).unwrap_err();
        assert!(same.is_invalid_input());

        let earlier = project(&player, Week::new(2), &config).unwrap_err();
        assert!(earlier.is_invalid_input());
    }

    #[test]
    fn test_later_season_history_rejected() {
        let config = ProjectionConfig::default();
        let player = ProjectionInput::new(PlayerId::new("p"), Position::QB, Season::new(2023))
            .with_history(vec![WeeklyPoints::new(Season::new(2024), Week::new(1), 20.0)]);

        assert!(project(&player, Week::new(10), &config)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_lineup_slot_positions_rejected() {
        let config = ProjectionConfig::default();
        for position in [Position::FLEX, Position::BE, Position::IR] {
            let err = project(&input(position, &[10.0]), Week::new(2), &config).unwrap_err();
            assert!(err.is_invalid_input());
        }
    }

    #[test]
    fn test_depth_rank_zero_rejected() {
        let config = ProjectionConfig::default();
        let player = input(Position::WR, &[10.0]).with_depth_chart_order(0);
        assert!(project(&player, Week::new(2), &config)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ProjectionConfig {
            recency_window: 0,
            ..Default::default()
        };
        let err = project(&input(Position::WR, &[10.0]), Week::new(2), &config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_scored_history_from_stat_lines() {
        let scorer = compile(
            &ScoringSystem::new()
                .with_rule("receptions", ScoringRule::per_unit(1.0))
                .with_rule("receiving_yards", ScoringRule::per_unit(0.1)),
        )
        .unwrap();
        let lines: Vec<StatLine> = [(2, 5.0, 50.0), (1, 3.0, 30.0)]
            .into_iter()
            .map(|(week, rec, yds)| {
                StatLine::new(PlayerId::new("wr"), SEASON, Week::new(week))
                    .with_stat("receptions", rec)
                    .with_stat("receiving_yards", yds)
            })
            .collect();

        let player = ProjectionInput::new(PlayerId::new("wr"), Position::WR, SEASON)
            .with_scored_history(&scorer, &lines);

        assert_eq!(player.history[0].week, Week::new(1));
        assert!((player.history[0].points - 6.0).abs() < 1e-9);
        assert!((player.history[1].points - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_batch_and_ranking() {
        let config = ProjectionConfig::default();
        let inputs = vec![
            input(Position::WR, &[5.0, 5.0, 5.0, 5.0]),
            input(Position::FLEX, &[5.0]),
            input(Position::RB, &[20.0, 20.0, 20.0, 20.0]),
            input(Position::TE, &[5.0]),
        ];

        let results = project_batch(&inputs, Week::new(5), &config);
        assert_eq!(results.len(), 4);
        assert!(results[1].is_err());

        let mut ranked: Vec<ProjectionResult> = results.into_iter().filter_map(|r| r.ok()).collect();
        rank_projections(&mut ranked);

        assert_eq!(ranked[0].position, Position::RB);
        // equal points: full-history WR outranks the low-data TE on confidence
        assert_eq!(ranked[1].position, Position::WR);
        assert_eq!(ranked[2].position, Position::TE);
    }

    #[test]
    fn test_role_multiplier_values() {
        assert_eq!(role_multiplier(1, 0.6), 1.0);
        assert!((role_multiplier(2, 0.6) - 0.6).abs() < 1e-12);
        assert_eq!(role_multiplier(5, 1.0), 1.0);
        assert!(role_multiplier(u32::MAX, 0.6) >= 0.0);
    }

    #[test]
    fn test_snap_share_scales_usage() {
        let config = ProjectionConfig::default();
        let player = input(Position::WR, &[10.0, 10.0, 10.0, 10.0]).with_snap_share(0.5);

        let result = project(&player, Week::new(5), &config).unwrap();

        assert!((result.basis.usage_multiplier - 0.8).abs() < 1e-12);
        assert!((result.projected_points - 8.0).abs() < 1e-9);

        let full_time = input(Position::WR, &[10.0, 10.0, 10.0, 10.0]).with_snap_share(1.0);
        let result = project(&full_time, Week::new(5), &config).unwrap();
        assert_eq!(result.basis.usage_multiplier, 1.0);
    }

    #[test]
    fn test_opponent_rank_adjusts_matchup() {
        let config = ProjectionConfig::default();
        let points = [10.0, 10.0, 10.0, 10.0];

        let soft = project(
            &input(Position::RB, &points).with_opponent_rank(1),
            Week::new(5),
            &config,
        )
        .unwrap();
        let tough = project(
            &input(Position::RB, &points).with_opponent_rank(32),
            Week::new(5),
            &config,
        )
        .unwrap();
        let middle = project(
            &input(Position::RB, &points).with_opponent_rank(16),
            Week::new(5),
            &config,
        )
        .unwrap();

        assert!((soft.projected_points - 12.0).abs() < 1e-9);
        assert!((tough.projected_points - 8.0).abs() < 1e-9);
        assert!((middle.basis.matchup_multiplier - (1.2 - 15.0 * 0.4 / 31.0)).abs() < 1e-12);
        assert!(soft.projected_points > middle.projected_points);
        assert!(middle.projected_points > tough.projected_points);
    }

    #[test]
    fn test_kicker_matchup_uses_team_offense_rank() {
        let config = ProjectionConfig::default();
        let points = [8.0, 8.0, 8.0, 8.0];

        let top_offense = project(
            &input(Position::K, &points)
                .with_team_offense_rank(1)
                .with_opponent_rank(32),
            Week::new(5),
            &config,
        )
        .unwrap();
        assert!((top_offense.basis.matchup_multiplier - 1.3).abs() < 1e-12);
        assert!((top_offense.projected_points - 10.4).abs() < 1e-9);

        let worst_offense = project(
            &input(Position::K, &points).with_team_offense_rank(32),
            Week::new(5),
            &config,
        )
        .unwrap();
        assert!((worst_offense.basis.matchup_multiplier - 0.7).abs() < 1e-12);

        // a kicker's opposing defense alone does not move the projection
        let defense_only = project(
            &input(Position::K, &points).with_opponent_rank(1),
            Week::new(5),
            &config,
        )
        .unwrap();
        assert_eq!(defense_only.basis.matchup_multiplier, 1.0);
    }

    #[test]
    fn test_adjustments_stack_before_injury() {
        let config = ProjectionConfig::default();
        let player = input(Position::WR, &[10.0, 10.0, 10.0, 10.0])
            .with_depth_chart_order(2)
            .with_snap_share(0.5)
            .with_opponent_rank(1)
            .with_injury_status(InjuryStatus::Questionable);

        let result = project(&player, Week::new(5), &config).unwrap();
        // 10 * 0.6 * 0.8 * 1.2 * 0.85
        assert!((result.projected_points - 4.896).abs() < 1e-9);

        let out = project(
            &player.clone().with_injury_status(InjuryStatus::Out),
            Week::new(5),
            &config,
        )
        .unwrap();
        assert_eq!(out.projected_points, 0.0);
    }

    #[test]
    fn test_out_of_range_usage_and_ranks_rejected() {
        let config = ProjectionConfig::default();
        let base = input(Position::WR, &[10.0]);

        for player in [
            base.clone().with_snap_share(1.5),
            base.clone().with_snap_share(-0.1),
            base.clone().with_snap_share(f64::NAN),
            base.clone().with_opponent_rank(0),
            base.clone().with_opponent_rank(33),
            base.clone().with_team_offense_rank(40),
        ] {
            let err = project(&player, Week::new(2), &config).unwrap_err();
            assert!(err.is_invalid_input(), "{:?}", player);
        }
    }
}
