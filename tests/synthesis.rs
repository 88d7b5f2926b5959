use std::time::Duration;

use intsynth::ast::{AstNode, Program};
use intsynth::canon;
use intsynth::cfg::Grammar;
use intsynth::interp;
use intsynth::parse;
use intsynth::synth::{
    BottomUpSynth, DivideConquerSynth, Example, SynthResult, Synthesizer, TopDownSynth,
};

fn init_logs() {
    let _ = colog::default_builder()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

fn solve<S: Synthesizer>(mut synth: S, examples: &[Example]) -> SynthResult {
    init_logs();
    synth.synthesize(&Grammar::arith(), examples)
}

fn assert_sound(result: SynthResult, examples: &[Example]) -> Program {
    let program = result.found().expect("expected a program");
    for ex in examples {
        assert_eq!(
            interp::evaluate(&program, &ex.input),
            ex.output,
            "program {program} fails on {ex:?}",
        );
    }
    program
}

fn identity_examples() -> Vec<Example> {
    vec![Example::xyz(1, 2, 3, 1), Example::xyz(5, 0, 0, 5)]
}

fn max_examples() -> Vec<Example> {
    vec![
        Example::xyz(2, 5, 9, 5),
        Example::xyz(5, 2, 1, 5),
        Example::xyz(3, 3, 7, 3),
    ]
}

#[test]
fn identity_is_solved_by_the_leaf_alone_bottom_up() {
    let examples = identity_examples();
    let program = assert_sound(solve(BottomUpSynth::new(), &examples), &examples);
    // found during seeding, before any composition is built
    assert_eq!(program.size(), 1);
    assert_eq!(program.to_string(), "x");
}

#[test]
fn identity_is_solved_by_the_leaf_alone_divide_conquer() {
    let examples = identity_examples();
    let program = assert_sound(solve(DivideConquerSynth::new(), &examples), &examples);
    assert_eq!(program.size(), 1);
    assert_eq!(program.to_string(), "x");
}

#[test]
fn identity_is_solved_by_the_leaf_alone_top_down() {
    let examples = identity_examples();
    let program = assert_sound(solve(TopDownSynth::new(), &examples), &examples);
    assert_eq!(program.to_string(), "x");
}

#[test]
fn constant_program_surfaces_smallest_first_top_down() {
    let examples = vec![Example::xyz(1, 2, 3, 2), Example::xyz(4, 5, 6, 2)];
    let program = assert_sound(solve(TopDownSynth::new(), &examples), &examples);
    assert_eq!(program.to_string(), "2");
}

#[test]
fn max_of_two_variables_bottom_up() {
    let examples = max_examples();
    let program = assert_sound(solve(BottomUpSynth::new(), &examples), &examples);
    let expected = AstNode::op(
        "Ite",
        vec![
            AstNode::op("Lt", vec![AstNode::term("x"), AstNode::term("y")]),
            AstNode::term("y"),
            AstNode::term("x"),
        ],
    );
    assert!(
        canon::equal(program.root(), &expected),
        "got {program}, wanted an equivalent of Ite(Lt(x, y), y, x)",
    );
}

#[test]
fn max_of_two_variables_divide_conquer() {
    let examples = max_examples();
    assert_sound(solve(DivideConquerSynth::new(), &examples), &examples);
}

#[test]
fn conflicting_examples_are_rejected_as_infeasible() {
    let examples = vec![Example::xyz(1, 1, 1, 2), Example::xyz(1, 1, 1, 3)];
    assert!(solve(DivideConquerSynth::new(), &examples).is_infeasible());
}

#[test]
fn unreachable_output_is_caught_by_the_precheck() {
    let examples = vec![Example::xyz(1, 1, 1, -5)];
    assert!(solve(DivideConquerSynth::new(), &examples).is_infeasible());
}

#[test]
fn bottom_up_gives_up_at_its_deadline_instead_of_hanging() {
    // a negative target the grammar cannot reach, with the precheck disarmed
    // by the negative input
    let examples = vec![Example::xyz(-10, 1, 1, -5)];
    let result = solve(
        BottomUpSynth::new().with_time_limit(Duration::ZERO),
        &examples,
    );
    assert!(result.is_gave_up());
}

#[test]
fn top_down_gives_up_at_its_queue_limit_instead_of_hanging() {
    let examples = vec![Example::xyz(1, 1, 1, -5)];
    let result = solve(TopDownSynth::new().with_queue_limit(10_000), &examples);
    assert!(result.is_gave_up());
}

#[test]
fn benchmark_files_round_trip_through_the_parser() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/benchmarks/max2.txt");
    let examples = parse::load_examples(path).expect("bundled benchmark parses");
    assert_eq!(examples, max_examples());
}

#[test]
fn affine_benchmark_is_solved_from_its_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/benchmarks/affine.txt");
    let examples = parse::load_examples(path).expect("bundled benchmark parses");
    assert_sound(solve(DivideConquerSynth::new(), &examples), &examples);
    assert_sound(solve(BottomUpSynth::new(), &examples), &examples);
}
