use std::fmt::{self, Display};

use chainlace_core::{DigitPositions, DigitSet};

use super::{
    Chain, ChainKind, Conclusions, GroupedLinkPattern, LinkDictionary, LinkKind,
    conclusion::DisplayConclusions,
};
use crate::{
    BoxedTechniqueStep, ConditionCells, ConditionDigitCells, TechniqueApplication, TechniqueGrid,
    TechniqueStep,
};

const NAME_X_CHAIN: &str = "X-Chain";
const NAME_XY_CHAIN: &str = "XY-Chain";
const NAME_AIC: &str = "AIC";
const NAME_GROUPED_AIC: &str = "Grouped AIC";
const NAME_LOOP: &str = "Continuous Nice Loop";
const NAME_GROUPED_LOOP: &str = "Grouped Continuous Nice Loop";

/// A chain together with what it proves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStep {
    chain: Chain,
    conclusions: Conclusions,
    patterns: Vec<GroupedLinkPattern>,
    name: &'static str,
}

impl ChainStep {
    /// Creates a step, looking up the patterns of the chain's links in `links`.
    #[must_use]
    pub fn new(chain: Chain, conclusions: Conclusions, links: &LinkDictionary) -> Self {
        let mut patterns = vec![];
        for (from, to, kind) in chain.links() {
            if let Some(pattern) = links.pattern(kind, from.set, to.set)
                && !patterns.contains(&pattern)
            {
                patterns.push(pattern);
            }
        }
        let name = classify(&chain, &patterns);
        Self {
            chain,
            conclusions,
            patterns,
            name,
        }
    }

    /// The chain.
    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Assignments and eliminations proven by the chain.
    #[must_use]
    pub fn conclusions(&self) -> &Conclusions {
        &self.conclusions
    }

    /// Grouped patterns used by the chain's links, in chain order.
    #[must_use]
    pub fn patterns(&self) -> &[GroupedLinkPattern] {
        &self.patterns
    }

    /// Number of links in the chain.
    #[must_use]
    pub fn complexity(&self) -> usize {
        self.chain.complexity()
    }

    /// Returns `true` if the chain uses a grouped node or a grouped pattern.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        is_grouped(&self.chain, &self.patterns)
    }

    /// Applies every conclusion. Returns `true` if the grid changed.
    pub fn apply_to(&self, grid: &mut TechniqueGrid) -> bool {
        let mut changed = false;
        for conclusion in &self.conclusions {
            changed |= conclusion.apply_to(grid);
        }
        changed
    }
}

fn is_grouped(chain: &Chain, patterns: &[GroupedLinkPattern]) -> bool {
    !patterns.is_empty() || chain.nodes().iter().any(|node| node.set.is_grouped())
}

fn classify(chain: &Chain, patterns: &[GroupedLinkPattern]) -> &'static str {
    let grouped = is_grouped(chain, patterns);
    match chain.kind() {
        ChainKind::ContinuousNiceLoop if grouped => NAME_GROUPED_LOOP,
        ChainKind::ContinuousNiceLoop => NAME_LOOP,
        ChainKind::Aic if grouped => NAME_GROUPED_AIC,
        ChainKind::Aic => {
            let nodes = chain.nodes();
            if nodes.iter().all(|node| node.set.digit() == nodes[0].set.digit()) {
                NAME_X_CHAIN
            } else if chain
                .links()
                .filter(|&(_, _, kind)| kind == LinkKind::Strong)
                .all(|(from, to, _)| from.set.positions() == to.set.positions())
            {
                NAME_XY_CHAIN
            } else {
                NAME_AIC
            }
        }
    }
}

impl TechniqueStep for ChainStep {
    fn technique_name(&self) -> &'static str {
        self.name
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        self.chain
            .nodes()
            .iter()
            .fold(DigitPositions::EMPTY, |cells, node| {
                cells | node.set.positions()
            })
    }

    fn condition_digit_cells(&self) -> ConditionDigitCells {
        self.chain
            .sets()
            .into_iter()
            .map(|set| (set.positions(), DigitSet::from_elem(set.digit())))
            .collect()
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        TechniqueApplication::from_conclusions(&self.conclusions)
    }
}

impl Display for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} => {}",
            self.name,
            self.chain,
            DisplayConclusions(&self.conclusions)
        )
    }
}

#[cfg(test)]
mod tests {
    use chainlace_core::{Candidate, Digit, Position};

    use super::*;
    use crate::chain::{CandidateSet, Conclusion, Node};

    fn set(x: u8, y: u8, digit: Digit) -> CandidateSet {
        Candidate::new(Position::new(x, y), digit).into()
    }

    #[test]
    fn test_x_chain_name_and_application() {
        let (a, b, c, d) = (
            set(0, 0, Digit::D1),
            set(4, 0, Digit::D1),
            set(4, 4, Digit::D1),
            set(8, 4, Digit::D1),
        );
        let mut links = LinkDictionary::new();
        links.add(LinkKind::Strong, a, b, None);
        links.add(LinkKind::Weak, b, c, None);
        links.add(LinkKind::Strong, c, d, None);
        let chain = Chain::new(
            ChainKind::Aic,
            vec![Node::off(a), Node::on(b), Node::off(c), Node::on(d)],
        );
        let conclusions = Conclusions::from([
            Conclusion::elimination(Candidate::new(Position::new(8, 0), Digit::D1)),
            Conclusion::elimination(Candidate::new(Position::new(0, 4), Digit::D1)),
        ]);
        let step = ChainStep::new(chain, conclusions, &links);
        assert_eq!(step.technique_name(), NAME_X_CHAIN);
        assert!(!step.is_grouped());
        assert_eq!(step.complexity(), 3);
        assert_eq!(step.condition_cells().len(), 4);
        assert_eq!(
            step.application(),
            [TechniqueApplication::CandidateElimination {
                positions: DigitPositions::from_iter([Position::new(8, 0), Position::new(0, 4)]),
                digits: DigitSet::from_elem(Digit::D1),
            }]
        );
        assert_eq!(
            step.to_string(),
            "X-Chain: r1c1(1) == r1c5(1) -- r5c5(1) == r5c9(1) => r1c9<>1, r5c1<>1"
        );

        let mut grid = TechniqueGrid::new();
        assert!(step.apply_to(&mut grid));
        assert!(!grid.has_candidate(Position::new(8, 0), Digit::D1));
        assert!(!step.apply_to(&mut grid));
    }

    #[test]
    fn test_xy_chain_name() {
        // r1c1{1,2} -- r1c5{2,3}: strong links inside cells only.
        let (a1, a2) = (set(0, 0, Digit::D1), set(0, 0, Digit::D2));
        let (b2, b3) = (set(4, 0, Digit::D2), set(4, 0, Digit::D3));
        let mut links = LinkDictionary::new();
        links.add(LinkKind::Strong, a1, a2, None);
        links.add(LinkKind::Weak, a2, b2, None);
        links.add(LinkKind::Strong, b2, b3, None);
        let chain = Chain::new(
            ChainKind::Aic,
            vec![Node::off(a1), Node::on(a2), Node::off(b2), Node::on(b3)],
        );
        let step = ChainStep::new(chain, Conclusions::new(), &links);
        assert_eq!(step.technique_name(), NAME_XY_CHAIN);
    }

    #[test]
    fn test_grouped_loop_name() {
        let group = CandidateSet::new(
            DigitPositions::from_iter([Position::new(0, 0), Position::new(1, 0)]),
            Digit::D1,
        )
        .unwrap();
        let (b, c, d) = (set(6, 0, Digit::D1), set(6, 6, Digit::D1), set(0, 6, Digit::D1));
        let mut links = LinkDictionary::new();
        links.add(LinkKind::Strong, group, b, None);
        links.add(LinkKind::Weak, b, c, None);
        links.add(LinkKind::Strong, c, d, None);
        links.add(LinkKind::Weak, d, group, None);
        let chain = Chain::new(
            ChainKind::ContinuousNiceLoop,
            vec![
                Node::on(group),
                Node::off(d),
                Node::on(c),
                Node::off(b),
                Node::on(group),
            ],
        );
        assert!(chain.validate(&links).is_ok());
        let step = ChainStep::new(chain, Conclusions::new(), &links);
        assert!(step.is_grouped());
        assert_eq!(step.technique_name(), NAME_GROUPED_LOOP);
    }
}
