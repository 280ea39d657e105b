// 統合テスト

use puyo_replay::application::replay::{ReplayConfig, ReplayInput, ReplayReconstructor};
use puyo_replay::application::versus::MatchTimeline;
use puyo_replay::constants::H;
use puyo_replay::domain::board::{pfen, Cell, Color, Grid};
use puyo_replay::domain::chain::{ChainResolver, GravityCollapser, VanishEvaluator};
use puyo_replay::domain::piece::{Decision, DecisionRecord, PieceDropper, Rotation, Tumo};
use puyo_replay::infrastructure::kifu::{Kifu1P, Kifu2P, Winner};
use puyo_replay::infrastructure::storage::{ExportFormat, JsonReplayWriter, ReplayWriter};

fn grid(bottom: &[&str]) -> Grid {
    let mut rows = vec!["......"; H - bottom.len()];
    rows.extend_from_slice(bottom);
    Grid::from_rows(&rows).unwrap()
}

fn records(pairs: &[(i32, i32)]) -> Vec<DecisionRecord> {
    pairs.iter().map(|&(x, r)| DecisionRecord::new(x, r)).collect()
}

/// ドメイン層の統合テスト
mod domain_integration {
    use super::*;

    #[test]
    fn rotation_mapping_places_both_puyos() {
        let rg = Tumo::new(Color::Red, Color::Green);
        let cases = [
            (Rotation::Up, [(12, 2, Color::Red), (11, 2, Color::Green)]),
            (Rotation::Right, [(12, 2, Color::Red), (12, 3, Color::Green)]),
            (Rotation::Down, [(12, 2, Color::Green), (11, 2, Color::Red)]),
            (Rotation::Left, [(12, 2, Color::Red), (12, 1, Color::Green)]),
        ];
        for (rotation, expected) in cases {
            let mut g = Grid::new();
            let placed = PieceDropper::drop(&mut g, rg, Decision::new(3, rotation).unwrap());
            assert_eq!(placed, 2, "{:?}", rotation);
            for (row, col, color) in expected {
                assert_eq!(g.get(row, col), Cell::Normal(color), "{:?}", rotation);
            }
        }
    }

    #[test]
    fn four_in_a_row_scores_forty() {
        let mut resolver = ChainResolver::new(grid(&["RRR..."]), 0);
        let timeline = resolver.resolve("RB".parse().unwrap(), Decision::new(4, Rotation::Up).unwrap());
        assert_eq!(timeline.chain_count(), 1);
        assert_eq!(timeline.gained(), 40);
        // 青だけが残って落ちる
        let settled = timeline.settled().unwrap();
        assert_eq!(settled.board.occupied_count(), 1);
        assert_eq!(settled.board.get(12, 3), Cell::Normal(Color::Blue));
    }

    #[test]
    fn five_red_and_four_blue_on_second_chain() {
        let mut g = grid(&["BBBB..", "RRRRR."]);
        let outcome = VanishEvaluator::evaluate(&mut g, 2);
        assert_eq!(outcome.vanished(), 9);
        assert_eq!(outcome.score, 1170);
    }

    #[test]
    fn ghost_row_is_never_connected() {
        // 0列目: 幽霊段を含めて赤4個、下は緑と青の交互
        let mut rows = vec!["......"; H];
        for row in rows.iter_mut().take(4) {
            *row = "R.....";
        }
        for (i, row) in rows.iter_mut().enumerate().skip(4) {
            *row = if i % 2 == 0 { "G....." } else { "B....." };
        }
        let mut g = Grid::from_rows(&rows).unwrap();
        let outcome = VanishEvaluator::evaluate(&mut g, 1);
        assert!(!outcome.vanished_any());
        assert_eq!(g.get(0, 0), Cell::Normal(Color::Red));
    }

    #[test]
    fn garbage_is_inert_and_keeps_order() {
        let mut g = grid(&["G.....", "R.....", "O....."]);
        g.set(11, 0, Cell::Vanishing(Color::Red));
        GravityCollapser::collapse(&mut g);
        assert_eq!(g.get(12, 0), Cell::Ojama);
        assert_eq!(g.get(11, 0), Cell::Normal(Color::Green));

        // おじゃまは連結しない
        let mut g = grid(&["OOOO.."]);
        assert!(!VanishEvaluator::evaluate(&mut g, 1).vanished_any());
    }

    #[test]
    fn puyos_are_conserved_through_a_chain() {
        let start = grid(&["GG....", "RRRG.."]);
        let before = start.occupied_count();
        let mut resolver = ChainResolver::new(start, 0);
        let timeline = resolver.resolve("RG".parse().unwrap(), Decision::new(3, Rotation::Up).unwrap());
        assert_eq!(timeline.chain_count(), 2);
        assert_eq!(
            before + timeline.placed - timeline.total_vanished(),
            resolver.grid().occupied_count()
        );
    }

    #[test]
    fn full_column_drop_is_skipped() {
        let mut g = Grid::new();
        let d = Decision::new(1, Rotation::Up).unwrap();
        for _ in 0..H {
            PieceDropper::drop(&mut g, "RG".parse().unwrap(), d);
        }
        assert_eq!(g.height_of(0), H);
        assert_eq!(PieceDropper::drop(&mut g, "RG".parse().unwrap(), d), 0);
    }

    #[test]
    fn pfen_seeded_grid_matches_rows() {
        let from_pfen = pfen::decode("rg/o/////").unwrap();
        let from_rows = grid(&["G.....", "RO...."]);
        assert_eq!(from_pfen, from_rows);
        assert_eq!(pfen::encode(&from_rows).unwrap(), "rg/o/////");
    }
}

/// アプリケーション層の統合テスト
mod application_integration {
    use super::*;

    #[test]
    fn frame_protocol_per_drop() {
        let input = ReplayInput::new(
            Tumo::parse_seq(&["RR", "RR", "GG"]).unwrap(),
            records(&[(1, 1), (3, 1), (1, 0)]),
        );
        let replay = ReplayReconstructor::new(ReplayConfig::core_only())
            .reconstruct(&input)
            .unwrap();
        let sizes: Vec<usize> = replay.turns.iter().map(|t| t.frames.len()).collect();
        assert_eq!(sizes, vec![1, 3, 1]);
        let scores: Vec<[u64; 2]> = replay.turns[1].frames.iter().map(|f| f.scores()).collect();
        assert_eq!(scores, vec![[0, 0], [0, 0], [40, 40]]);
        assert_eq!(replay.turns[2].frames[0].scores(), [40, 0]);
    }

    #[test]
    fn expected_turns_controls_terminal_turn() {
        let input = ReplayInput::new(Tumo::parse_seq(&["RG"]).unwrap(), records(&[(1, 0), (2, 0)]));
        let short = ReplayReconstructor::new(ReplayConfig::default().with_expected_turns(1))
            .reconstruct(&input)
            .unwrap();
        assert!(short.turns.iter().all(|t| !t.is_terminal()));

        let long = ReplayReconstructor::new(ReplayConfig::default().with_expected_turns(2))
            .reconstruct(&input)
            .unwrap();
        assert!(long.turns.last().unwrap().is_terminal());
    }

    #[test]
    fn batch_reconstruction_isolates_failures() {
        let tumos = Tumo::parse_seq(&["RG", "BY"]).unwrap();
        let good = ReplayInput::new(tumos.clone(), records(&[(1, 0), (6, 0)]));
        let off_board = ReplayInput::new(tumos.clone(), records(&[(6, 1)]));
        let bad_rotation = ReplayInput::new(tumos, records(&[(2, 4)]));
        let results = ReplayReconstructor::default().reconstruct_batch(&[
            good.clone(),
            off_board,
            good,
            bad_rotation,
        ]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert!(results[3].is_err());
        assert_eq!(
            results[0].as_ref().unwrap().final_frame(),
            results[2].as_ref().unwrap().final_frame()
        );
    }

    #[test]
    fn match_timeline_from_kifu() {
        let kifu = Kifu2P::from_json(
            r#"{
                "date": "2021-08-01",
                "win_count_1p": 1,
                "win_count_2p": 0,
                "visible_tumos": 3,
                "json_matches": [{
                    "won_1p": true,
                    "tumos": ["RG"],
                    "json_events": [
                        {"frame": 0,
                         "json_state_1p": {"tumo_index": 0, "field": "//////", "score": 0, "ojama_fixed": 0, "ojama_ongoing": 0, "current_chain": 0},
                         "json_state_2p": {"tumo_index": 0, "field": "//////", "score": 0, "ojama_fixed": 0, "ojama_ongoing": 0, "current_chain": 0}},
                        {"frame": 30,
                         "json_state_1p": {"tumo_index": 1, "field": "rg/////", "score": 0, "ojama_fixed": 0, "ojama_ongoing": 0, "current_chain": 0},
                         "json_state_2p": {"tumo_index": 1, "field": "/o////", "score": 0, "ojama_fixed": 0, "ojama_ongoing": 6, "current_chain": 0}}
                    ]
                }]
            }"#,
        )
        .unwrap();
        let timeline = MatchTimeline::from_events(&kifu.json_matches[0].json_events).unwrap();
        assert_eq!(timeline.len(), 2);
        let last = &timeline.frames[1];
        assert_eq!(last.players[0].board.occupied_count(), 2);
        assert_eq!(last.players[1].board.get(12, 1), Cell::Ojama);
        assert_eq!(last.players[1].ojama_ongoing, 6);

        let summary = &kifu.summaries().unwrap()[0];
        assert_eq!(summary.winner, Winner::Player1);
        assert_eq!(summary.frames, 30);
    }
}

/// インフラ層の統合テスト
mod infrastructure_integration {
    use super::*;

    const KIFU: &str = r#"{
        "date": "2021-08-01T12:00:00Z",
        "score": 40,
        "visible_tumos": 3,
        "tumos": ["RR", "RR"],
        "json_decisions": [
            {"think_ms": 12, "decisions": [{"x": 1, "r": 1}]},
            {"think_ms": 8, "decisions": [{"x": 3, "r": 1}, {"x": 5, "r": 0}]}
        ]
    }"#;

    #[test]
    fn kifu_to_exported_timeline() {
        let kifu = Kifu1P::from_json(KIFU).unwrap();
        let replay = ReplayReconstructor::default()
            .reconstruct(&kifu.to_replay_input().unwrap())
            .unwrap();
        assert_eq!(replay.score, kifu.score);

        let mut buf = Vec::new();
        {
            let mut writer = JsonReplayWriter::new(&mut buf, ExportFormat::JsonArray).unwrap();
            writer.write_replay(&replay).unwrap();
            writer.flush().unwrap();
            assert_eq!(writer.count(), 3);
        }
        let turns: Vec<serde_json::Value> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(turns[0]["decision"], serde_json::json!({"x": 1, "r": 1}));
        assert_eq!(turns[1]["boards"][1][12][0], "Red-V");
        assert_eq!(turns[1]["scores"], serde_json::json!([[0, 0], [0, 0], [40, 40]]));
        assert_eq!(turns[2]["decision"], serde_json::json!({"x": -1, "r": -1}));
        assert_eq!(turns[2]["scores"], serde_json::json!([[40, 0]]));
    }

    #[test]
    fn kifu_summary() {
        let summary = Kifu1P::from_json(KIFU).unwrap().summary();
        assert_eq!(summary.turns, 2);
        assert!((summary.average_think_ms - 10.0).abs() < f64::EPSILON);
    }
}
