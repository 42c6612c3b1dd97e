use std::{
    collections::{BTreeSet, HashMap, HashSet, VecDeque},
    ops::ControlFlow,
};

use chainlace_core::Candidate;

use super::{
    CandidateSet, Chain, ChainError, ChainKind, ChainStep, ChainingOptions, Conclusion,
    Conclusions, LinkDictionary, LinkKind, Node, Polarity, either_true_eliminations,
    rule::{self, BoxedChainingRule, LinkContext, LoopConclusionContext},
};
use crate::{SolverError, TechniqueGrid};

/// Chaining rules bundled with the options that select them.
///
/// # Examples
///
/// ```
/// use chainlace_core::{Digit, Position};
/// use chainlace_solver::{
///     TechniqueGrid,
///     chain::{ChainSearcher, ChainingOptions},
/// };
///
/// // Digit 1 is confined to r1/r5 in column 1 and to r2/r5 in column 5.
/// let mut grid = TechniqueGrid::new();
/// for y in 0..9 {
///     if y != 0 && y != 4 {
///         grid.remove_candidate(Position::new(0, y), Digit::D1);
///     }
///     if y != 1 && y != 4 {
///         grid.remove_candidate(Position::new(4, y), Digit::D1);
///     }
/// }
///
/// let searcher = ChainSearcher::new(ChainingOptions::elementary());
/// let steps = searcher.find_steps(&grid, false)?;
/// assert!(!steps.is_empty());
/// assert!(steps.windows(2).all(|w| w[0].complexity() <= w[1].complexity()));
/// # Ok::<(), chainlace_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChainSearcher {
    rules: Vec<BoxedChainingRule>,
    options: ChainingOptions,
}

impl ChainSearcher {
    /// Creates a searcher using every rule enabled by `options`.
    #[must_use]
    pub fn new(options: ChainingOptions) -> Self {
        Self::with_rules(rule::all_rules(), options)
    }

    /// Creates a searcher with an explicit rule list.
    #[must_use]
    pub fn with_rules(rules: Vec<BoxedChainingRule>, options: ChainingOptions) -> Self {
        Self { rules, options }
    }

    /// Search options.
    #[must_use]
    pub fn options(&self) -> &ChainingOptions {
        &self.options
    }

    /// Configured rules, enabled or not.
    #[must_use]
    pub fn rules(&self) -> &[BoxedChainingRule] {
        &self.rules
    }

    /// Builds the link graph of `grid`.
    #[must_use]
    pub fn build_links(&self, grid: &TechniqueGrid) -> LinkDictionary {
        collect_links(grid, &self.options, &self.rules)
    }

    /// Builds the link graph and searches it.
    ///
    /// # Errors
    ///
    /// Same as [`search_chains`].
    pub fn find_steps(
        &self,
        grid: &TechniqueGrid,
        only_find_one: bool,
    ) -> Result<Vec<ChainStep>, SolverError> {
        let links = self.build_links(grid);
        search_chains(grid, &links, &self.rules, only_find_one)
    }

    /// Returns the first step found, if any.
    ///
    /// # Errors
    ///
    /// Same as [`search_chains`].
    pub fn find_first(&self, grid: &TechniqueGrid) -> Result<Option<ChainStep>, SolverError> {
        Ok(self.find_steps(grid, true)?.into_iter().next())
    }
}

/// Builds the link graph of `grid` from every rule enabled by `options`.
#[must_use]
pub fn build_links(grid: &TechniqueGrid, options: &ChainingOptions) -> LinkDictionary {
    collect_links(grid, options, &rule::all_rules())
}

fn collect_links(
    grid: &TechniqueGrid,
    options: &ChainingOptions,
    rules: &[BoxedChainingRule],
) -> LinkDictionary {
    let mut links = LinkDictionary::new();
    for rule in rules {
        let link_type = rule.link_type();
        if !options.is_enabled(link_type) {
            continue;
        }
        let mut context = LinkContext::new(grid, options, link_type, &mut links);
        rule.collect_links(&mut context);
        log::trace!("{link_type:?}: {} new links", context.added());
    }
    links
}

/// Searches `links` for chains that prove something about `grid`.
///
/// Every candidate of every undecided cell is used as a seed, once as `Off` and once as
/// `On`. Steps are sorted by complexity, then by seed, then by conclusions, and each
/// chain is reported once regardless of the end it was found from. With
/// `only_find_one`, the search stops at the first seed yielding a step.
///
/// `rules` contribute pattern-specific eliminations of continuous nice loops.
///
/// # Errors
///
/// Returns [`SolverError::Chain`] if a chain breaks alternation or the search exceeds
/// its iteration bound.
pub fn search_chains(
    grid: &TechniqueGrid,
    links: &LinkDictionary,
    rules: &[BoxedChainingRule],
    only_find_one: bool,
) -> Result<Vec<ChainStep>, SolverError> {
    let limit = links.node_count() * 2;
    let mut seen = HashSet::new();
    let mut found = vec![];
    'seeds: for pos in grid.undecided_cells() {
        for digit in grid.candidates_at(pos) {
            let seed = Candidate::new(pos, digit);
            let set = CandidateSet::from_candidate(seed);
            if !links.contains(set) {
                continue;
            }
            for start in [Node::off(set), Node::on(set)] {
                walk(links, start, limit, |chain| {
                    let Some(step) = synthesize(grid, links, rules, chain)? else {
                        return Ok(ControlFlow::Continue(()));
                    };
                    if !seen.insert((step.conclusions().clone(), step.chain().sets())) {
                        return Ok(ControlFlow::Continue(()));
                    }
                    log::debug!("found {step}");
                    found.push((seed.index(), step));
                    Ok(if only_find_one {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    })
                })?;
                if only_find_one && !found.is_empty() {
                    break 'seeds;
                }
            }
        }
    }
    found.sort_by(|(seed_a, a), (seed_b, b)| {
        (a.complexity(), seed_a, a.conclusions()).cmp(&(b.complexity(), seed_b, b.conclusions()))
    });
    Ok(found.into_iter().map(|(_, step)| step).collect())
}

/// Breadth-first alternating walk from `start`, reporting every closed chain.
fn walk<F>(
    links: &LinkDictionary,
    start: Node,
    limit: usize,
    mut on_chain: F,
) -> Result<(), SolverError>
where
    F: FnMut(Chain) -> Result<ControlFlow<()>, SolverError>,
{
    let mut parents = HashMap::new();
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut iterations = 0;
    while let Some(current) = queue.pop_front() {
        iterations += 1;
        if iterations > limit {
            return Err(ChainError::SearchOverflow.into());
        }
        let path = trace_path(&parents, start, current);
        for next in links.next_nodes(current) {
            let on_path = path.iter().any(|node| node.set == next.set);
            if let Some(kind) = closing_kind(start, path.len(), on_path, next) {
                let mut nodes = path.clone();
                nodes.push(next);
                if on_chain(Chain::new(kind, nodes))?.is_break() {
                    return Ok(());
                }
            }
            if on_path || !visited.insert(next) {
                continue;
            }
            parents.insert(next, current);
            queue.push_back(next);
        }
    }
    Ok(())
}

/// Nodes from `start` to `end` following recorded parents.
fn trace_path(parents: &HashMap<Node, Node>, start: Node, end: Node) -> Vec<Node> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        let Some(&parent) = parents.get(&current) else {
            break;
        };
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Kind of chain closed by appending `next` to a path of `path_len` nodes, if any.
///
/// `on_path` tells whether the set of `next` already appears on the path.
fn closing_kind(start: Node, path_len: usize, on_path: bool, next: Node) -> Option<ChainKind> {
    if next.set == start.set {
        return match (start.polarity, next.polarity) {
            // !s => s, or s => !s.
            (Polarity::Off, Polarity::On) | (Polarity::On, Polarity::Off) => Some(ChainKind::Aic),
            (Polarity::On, Polarity::On) if path_len >= 4 => {
                Some(ChainKind::ContinuousNiceLoop)
            }
            _ => None,
        };
    }
    let closes_aic = start.polarity == Polarity::Off && next.is_on() && path_len >= 3 && !on_path;
    closes_aic.then_some(ChainKind::Aic)
}

fn synthesize(
    grid: &TechniqueGrid,
    links: &LinkDictionary,
    rules: &[BoxedChainingRule],
    chain: Chain,
) -> Result<Option<ChainStep>, SolverError> {
    let conclusions = match chain.kind() {
        ChainKind::Aic => open_chain_conclusions(grid, &chain),
        ChainKind::ContinuousNiceLoop => loop_conclusions(grid, links, rules, &chain),
    };
    let conclusions = conclusions
        .into_iter()
        .filter(|conclusion| conclusion.is_applicable(grid))
        .collect::<Conclusions>();
    if conclusions.is_empty() {
        return Ok(None);
    }
    chain.validate(links)?;
    Ok(Some(ChainStep::new(chain.canonicalized(), conclusions, links)))
}

fn open_chain_conclusions(grid: &TechniqueGrid, chain: &Chain) -> Conclusions {
    let (Some(first), Some(last)) = (chain.first(), chain.last()) else {
        return Conclusions::new();
    };
    if first.set != last.set {
        return either_true_eliminations(grid, first.set, last.set);
    }
    let Some(candidate) = first.set.as_candidate() else {
        return Conclusions::new();
    };
    let conclusion = match first.polarity {
        Polarity::Off => Conclusion::assignment(candidate),
        Polarity::On => Conclusion::elimination(candidate),
    };
    Conclusions::from([conclusion])
}

fn loop_conclusions(
    grid: &TechniqueGrid,
    links: &LinkDictionary,
    rules: &[BoxedChainingRule],
    chain: &Chain,
) -> Conclusions {
    let mut conclusions = Conclusions::new();
    for (from, to, kind) in chain.links() {
        if kind == LinkKind::Weak {
            conclusions.extend(either_true_eliminations(grid, from.set, to.set));
        }
    }
    let mut context = LoopConclusionContext::new(grid, links, chain, &mut conclusions);
    for rule in rules {
        rule.collect_loop_conclusions(&mut context);
    }
    let sets = chain.sets();
    conclusions.retain(|conclusion| !in_sets(&sets, conclusion.candidate));
    conclusions
}

fn in_sets(sets: &BTreeSet<CandidateSet>, candidate: Candidate) -> bool {
    sets.iter()
        .any(|set| set.digit() == candidate.digit && set.positions().contains(candidate.position))
}
