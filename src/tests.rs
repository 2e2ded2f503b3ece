#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use varisat::{CnfFormula, ExtendFormula, Solver, Var};

    use crate::board::{Board, ParseBoardError};
    use crate::cardinality;
    use crate::logic;
    use crate::solver::{Instance, Solution};
    use crate::topology::{Direction, Topology};

    #[test]
    fn equiv_truth_table() {
        let mut solver = Solver::new();
        let x = solver.new_var().positive();
        let y = solver.new_var().positive();
        logic::equiv(&mut solver, x, y);

        for (vx, vy) in [(false, false), (false, true), (true, false), (true, true)] {
            solver.assume(&[x.var().lit(vx), y.var().lit(vy)]);
            assert_eq!(solver.solve().unwrap(), vx == vy, "x={vx} y={vy}");
        }
    }

    #[test]
    fn glue_truth_table() {
        let mut solver = Solver::new();
        let g = solver.new_var().positive();
        let x = solver.new_var().positive();
        let y = solver.new_var().positive();
        logic::glue(&mut solver, g, x, y);

        for assignment in 0u8..8 {
            let (vg, vx, vy) = (assignment & 1 != 0, assignment & 2 != 0, assignment & 4 != 0);
            solver.assume(&[g.var().lit(vg), x.var().lit(vx), y.var().lit(vy)]);
            assert_eq!(solver.solve().unwrap(), !vg || vx == vy, "g={vg} x={vx} y={vy}");
        }
    }

    #[test]
    fn stick_truth_table() {
        let mut solver = Solver::new();
        let g = solver.new_var().positive();
        let x = solver.new_var().positive();
        let y = solver.new_var().positive();
        logic::stick(&mut solver, g, x, y);

        for assignment in 0u8..8 {
            let (vg, vx, vy) = (assignment & 1 != 0, assignment & 2 != 0, assignment & 4 != 0);
            solver.assume(&[g.var().lit(vg), x.var().lit(vx), y.var().lit(vy)]);
            assert_eq!(solver.solve().unwrap(), vg || !(vx && vy), "g={vg} x={vx} y={vy}");
        }
    }

    #[test]
    fn cardinality_matches_direct_count() {
        for m in 1usize..=5 {
            for n in 0..=m {
                let mut solver = Solver::new();
                let lits = (0..m).map(|_| solver.new_var().positive()).collect_vec();
                cardinality::exactly(&mut solver, n, &lits);

                for mask in 0u32..(1 << m) {
                    let assumptions = lits
                        .iter()
                        .enumerate()
                        .map(|(index, lit)| lit.var().lit(mask & (1 << index) != 0))
                        .collect_vec();
                    solver.assume(&assumptions);
                    assert_eq!(
                        solver.solve().unwrap(),
                        mask.count_ones() as usize == n,
                        "m={m} n={n} mask={mask:b}"
                    );
                }
            }
        }
    }

    #[test]
    fn at_most_with_large_target_is_vacuous() {
        let mut solver = Solver::new();
        let lits = (0..3).map(|_| solver.new_var().positive()).collect_vec();
        cardinality::at_most(&mut solver, 5, &lits);

        solver.assume(&lits);
        assert!(solver.solve().unwrap());
    }

    #[test]
    fn at_least_beyond_len_contradicts() {
        // one more than available falls out of the single empty subset
        let mut solver = Solver::new();
        let lits = (0..2).map(|_| solver.new_var().positive()).collect_vec();
        cardinality::at_least(&mut solver, 3, &lits);
        assert!(!solver.solve().unwrap());

        // far beyond available is emitted explicitly
        let mut solver = Solver::new();
        let lits = (0..2).map(|_| solver.new_var().positive()).collect_vec();
        cardinality::at_least(&mut solver, 5, &lits);
        assert!(!solver.solve().unwrap());
    }

    #[test]
    fn shared_edges_alias() {
        let mut formula = CnfFormula::new();
        let topology = Topology::new(&mut formula, 2, 4, 3);

        assert_eq!(topology.edge(1, 2, Direction::South), topology.edge(2, 2, Direction::North));
        assert_eq!(topology.edge(1, 2, Direction::East), topology.edge(1, 3, Direction::West));
        assert_ne!(topology.edge(1, 2, Direction::North), topology.edge(1, 2, Direction::South));
        assert_ne!(topology.edge(1, 2, Direction::West), topology.edge(1, 2, Direction::East));
    }

    #[test]
    fn topology_variable_count() {
        let (pairs, width, height) = (3, 5, 4);
        let mut formula = CnfFormula::new();
        let _topology = Topology::new(&mut formula, pairs, width, height);

        assert_eq!(
            formula.var_count(),
            pairs * width * height + width * height + (width + 1) * height + width * (height + 1)
        );
    }

    #[test]
    fn walls_forced_false() {
        // without assumptions this instance is satisfiable, so each failure below is pinned on
        // the assumed wall edge
        let mut instance = Instance::new(2, 3, 3);
        instance.constrain();
        assert!(instance.solve().is_some());

        for (i, j, direction) in [
            (0, 1, Direction::North),
            (2, 1, Direction::South),
            (1, 0, Direction::West),
            (1, 2, Direction::East),
        ] {
            let mut instance = Instance::new(2, 3, 3);
            instance.constrain();
            let wall = instance.topology().edge(i, j, direction);
            instance.assume(&[wall]);
            assert!(instance.solve().is_none(), "({i}, {j}) {direction:?}");
        }
    }

    #[test]
    fn three_occupied_ports_rejected() {
        let mut instance = Instance::new(2, 3, 3);
        instance.constrain();
        let topology = instance.topology();
        let assumptions = vec![
            topology.sink(1, 1),
            topology.edge(1, 1, Direction::North),
            topology.edge(1, 1, Direction::East),
        ];
        instance.assume(&assumptions);
        assert!(instance.solve().is_none());
    }

    #[test]
    fn corner_forces_diagonal_continuation() {
        // a path turning north-then-west at (2, 2) must continue through (1, 1) in both of the
        // same directions unless (1, 1) is a sink
        for blocked in [Direction::North, Direction::West] {
            let mut instance = Instance::new(2, 4, 4);
            instance.constrain();
            let topology = instance.topology();
            let assumptions = vec![
                topology.edge(2, 2, Direction::North),
                topology.edge(2, 2, Direction::West),
                !topology.sink(1, 1),
                !topology.edge(1, 1, blocked),
            ];
            instance.assume(&assumptions);
            assert!(instance.solve().is_none(), "{blocked:?}");
        }
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let board = Board::parse("# flow free classic, sort of\n\nAB\n..\n").unwrap();

        assert_eq!(board.width(), 2);
        assert_eq!(board.height(), 2);
        assert_eq!(board.labels(), &['A', 'B']);
        assert_eq!(format!("{}", board), "AB\n..\n");
    }

    #[test]
    fn parse_interns_labels_in_first_appearance_order() {
        let board = Board::parse("B.A\nA.B\n").unwrap();

        // '.' is empty, never a label
        assert_eq!(board.labels(), &['B', 'A']);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert!(matches!(
            Board::parse("AB\nA\n"),
            Err(ParseBoardError::RaggedRow { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(matches!(Board::parse(""), Err(ParseBoardError::Empty)));
        assert!(matches!(Board::parse("# nothing here\n\n"), Err(ParseBoardError::Empty)));
    }

    #[test]
    fn solve_adjacent_pair() {
        let board = Board::parse("AA").unwrap();
        let solution = board.solve().unwrap();

        assert!(solution.is_sink(0, 0));
        assert!(solution.is_sink(0, 1));
        assert_eq!(solution.label_at(0, 0), 'A');
        assert_eq!(solution.label_at(0, 1), 'A');
        assert!(solution.edge_active(0, 0, Direction::East));
        assert_eq!(format!("{}", solution), "AA\n");
    }

    #[test]
    fn solve_straight_corridor() {
        let board = Board::parse("A..A").unwrap();
        let solution = board.solve().unwrap();

        assert!(!solution.is_sink(0, 1));
        assert!(!solution.is_sink(0, 2));
        assert_eq!(solution.label_at(0, 1), 'A');
        assert_eq!(solution.label_at(0, 2), 'A');
        assert!(solution.edge_active(0, 1, Direction::East));
        assert_eq!(format!("{}", solution), "A──A\n");
    }

    #[test]
    fn solve_vertical_corridor() {
        let board = Board::parse("A\n.\n.\nA\n").unwrap();
        let solution = board.solve().unwrap();

        assert!(solution.edge_active(1, 0, Direction::North));
        assert!(solution.edge_active(1, 0, Direction::South));
        assert_eq!(format!("{}", solution), "A\n│\n│\nA\n");
    }

    #[test]
    fn solve_bent_path() {
        let board = Board::parse("ABB\n.CC\n..A\n").unwrap();
        let solution = board.solve().unwrap();

        // the A path is forced down column 0 and along row 2; everything else is a clue
        assert_eq!(solution.label_at(1, 0), 'A');
        assert_eq!(solution.label_at(2, 0), 'A');
        assert_eq!(solution.label_at(2, 1), 'A');
        assert!(solution.is_sink(1, 1));
        assert!(!solution.is_sink(2, 0));
        assert!(solution.edge_active(2, 0, Direction::North));
        assert!(solution.edge_active(2, 0, Direction::East));
        assert!(!solution.edge_active(1, 0, Direction::East));
        assert_eq!(format!("{}", solution), "ABB\n│CC\n└─A\n");
    }

    #[test]
    fn lone_clue_unsatisfiable() {
        // a label with a single endpoint cannot form a pair
        let board = Board::parse("A.").unwrap();
        assert!(board.solve().is_none());
    }

    #[test]
    fn diagonal_termini_unsatisfiable() {
        // every cell must carry the lone label, so every internal edge is forced active and the
        // clue cells end up with more than two occupied ports; equivalently, no spanning routing between
        // opposite corners of a 2x2 grid exists
        let board = Board::parse("A.\n.A\n").unwrap();
        assert!(board.solve().is_none());
    }

    #[test]
    fn ambiguous_routing_rejected() {
        // two distinct spanning routings connect the clues; the uniqueness constraints refuse
        // to pick one arbitrarily
        let board = Board::parse("A.A\n...\n...\n").unwrap();
        assert!(board.solve().is_none());
    }

    #[test]
    fn render_corner_glyphs() {
        let mut formula = CnfFormula::new();
        let topology = Topology::new(&mut formula, 1, 2, 2);
        let mut model =
            (0..formula.var_count()).map(|index| Var::from_index(index).negative()).collect_vec();
        for lit in [
            topology.assignment(0, 0, 0),
            topology.assignment(0, 1, 0),
            topology.assignment(1, 0, 0),
            topology.assignment(1, 1, 0),
            topology.sink(0, 0),
            topology.sink(1, 0),
            topology.edge(0, 0, Direction::East),
            topology.edge(1, 0, Direction::East),
            topology.edge(0, 1, Direction::South),
        ] {
            model[lit.var().index()] = lit;
        }

        let solution = Solution { labels: vec!['A'], topology, model };
        assert_eq!(format!("{}", solution), "A┐\nA┘\n");

        let mut formula = CnfFormula::new();
        let topology = Topology::new(&mut formula, 1, 2, 2);
        let mut model =
            (0..formula.var_count()).map(|index| Var::from_index(index).negative()).collect_vec();
        for lit in [
            topology.assignment(0, 0, 0),
            topology.assignment(0, 1, 0),
            topology.assignment(1, 0, 0),
            topology.assignment(1, 1, 0),
            topology.sink(0, 1),
            topology.sink(1, 1),
            topology.edge(0, 0, Direction::East),
            topology.edge(1, 0, Direction::East),
            topology.edge(0, 0, Direction::South),
        ] {
            model[lit.var().index()] = lit;
        }

        let solution = Solution { labels: vec!['A'], topology, model };
        assert_eq!(format!("{}", solution), "┌A\n└A\n");
    }
}
