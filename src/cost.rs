/*
Implements:
 - the cost policies (random, constant, product, none)
 - the assignment of costs to the non-adjacent pairs of a graph, possibly bounded
*/
use std::fmt;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::graph::{Graph, Pair};

/** cost of a non-adjacent pair */
pub type Cost = u64;

/// maximum random cost used when none is given
pub const DEFAULT_MAX_COST:Cost = 10;

/** cost given to a non-adjacent pair. Displayed as a `cost(i,j,c).` fact. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CostEntry {
    /// non-adjacent pair (i < j)
    pub pair: Pair,
    /// cost (>= 1)
    pub cost: Cost,
}

impl fmt::Display for CostEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cost({},{},{}).", self.pair.0, self.pair.1, self.cost)
    }
}

/** how costs are given to the non-adjacent pairs. Exactly one policy is active. */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CostPolicy {
    /// no cost data
    None,
    /// uniform cost in [1, max_cost]. Unseeded generators draw from the OS entropy.
    Random {
        /// largest cost that can be drawn
        max_cost: Cost,
        /// seed of the generator (None: non-deterministic)
        #[serde(default)]
        seed: Option<u64>,
    },
    /// same cost for every pair
    Constant {
        /// cost given to each pair
        cost: Cost,
    },
    /// pair (i,j) costs i*j
    Product,
}

impl Default for CostPolicy {
    fn default() -> Self {
        CostPolicy::Random { max_cost: DEFAULT_MAX_COST, seed: None }
    }
}

/** independent policy switches, as given on a command line */
#[derive(Debug, Clone, Default)]
pub struct PolicyFlags {
    /// random costs requested
    pub random: bool,
    /// seed for the random costs
    pub seed: Option<u64>,
    /// maximum random cost (defaults to DEFAULT_MAX_COST)
    pub max_cost: Option<Cost>,
    /// constant cost requested (with its value)
    pub const_cost: Option<Cost>,
    /// product costs requested
    pub product: bool,
    /// no cost requested
    pub no_costs: bool,
}

impl CostPolicy {

    /** builds the policy from independent switches.
    More than one active switch is an error; no active switch means random costs
    in [1, DEFAULT_MAX_COST] (same as the default policy). A seed or a maximum cost
    given with another policy is an error.
    */
    pub fn from_flags(flags:&PolicyFlags) -> Result<Self> {
        let nb_active = [flags.random, flags.const_cost.is_some(), flags.product, flags.no_costs]
            .iter().filter(|b| **b).count();
        if nb_active > 1 {
            return Err(Error::Config("ambiguous cost policy".to_string()));
        }
        let res = if let Some(cost) = flags.const_cost {
            CostPolicy::Constant { cost }
        } else if flags.product {
            CostPolicy::Product
        } else if flags.no_costs {
            CostPolicy::None
        } else {
            CostPolicy::Random {
                max_cost: flags.max_cost.unwrap_or(DEFAULT_MAX_COST),
                seed: flags.seed,
            }
        };
        let is_random = matches!(res, CostPolicy::Random { .. });
        if !is_random && (flags.seed.is_some() || flags.max_cost.is_some()) {
            return Err(Error::Config(format!(
                "seed and maximum cost only apply to random costs (policy: {})", res.name()
            )));
        }
        res.validate()?;
        Ok(res)
    }

    /// checks the numeric parameters of the policy
    pub fn validate(&self) -> Result<()> {
        match self {
            CostPolicy::Random { max_cost: 0, .. } => Err(Error::Config(
                "the maximum random cost must be positive".to_string()
            )),
            CostPolicy::Constant { cost: 0 } => Err(Error::Config(
                "the constant cost must be positive".to_string()
            )),
            _ => Ok(()),
        }
    }

    /// short name of the policy
    pub fn name(&self) -> &'static str {
        match self {
            CostPolicy::None => "none",
            CostPolicy::Random { .. } => "random",
            CostPolicy::Constant { .. } => "constant",
            CostPolicy::Product => "product",
        }
    }
}

/// creates the generator of a random policy (seeded, or from the OS entropy)
pub fn make_rng(seed:Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/** assigns costs to the non-adjacent pairs of a graph.

If max_candidates > 0, at most max_candidates pairs receive a cost:
 - random: uniform sample without replacement (same generator as the costs)
 - constant, product: the first pairs in lexicographic order

The result is sorted by pair.
*/
pub fn assign_costs(graph:&Graph, policy:&CostPolicy, max_candidates:usize) -> Result<Vec<CostEntry>> {
    policy.validate()?;
    log::debug!(
        "{} non-adjacent pairs, policy: {}, bound: {}",
        graph.nb_pairs() - graph.nb_edges(), policy.name(), max_candidates
    );
    let res = match policy {
        CostPolicy::None => Vec::new(),
        CostPolicy::Random { max_cost, seed } => {
            let candidates:Vec<Pair> = graph.non_adjacent_pairs().collect();
            let mut rng = make_rng(*seed);
            assign_random_costs(&candidates, *max_cost, max_candidates, &mut rng)
        },
        CostPolicy::Constant { cost } => {
            first_candidates(graph, max_candidates)
                .map(|pair| CostEntry { pair, cost:*cost })
                .collect()
        },
        CostPolicy::Product => {
            first_candidates(graph, max_candidates)
                .map(|(i,j)| CostEntry { pair:(i,j), cost:(i as Cost) * (j as Cost) })
                .collect()
        },
    };
    Ok(res)
}

/** random policy with a caller-owned generator.
Selects the surviving candidates first, then draws the costs in pair order.
*/
pub fn assign_random_costs<R:Rng>(
    candidates:&[Pair], max_cost:Cost, max_candidates:usize, rng:&mut R
) -> Vec<CostEntry> {
    let selected:Vec<Pair> = if max_candidates > 0 && candidates.len() > max_candidates {
        let mut indices = rand::seq::index::sample(rng, candidates.len(), max_candidates)
            .into_vec();
        indices.sort_unstable();
        indices.into_iter().map(|i| candidates[i]).collect()
    } else {
        candidates.to_vec()
    };
    selected.into_iter()
        .map(|pair| CostEntry { pair, cost:rng.gen_range(1..=max_cost) })
        .collect()
}

/// first max_candidates non-adjacent pairs (all of them if max_candidates is 0)
fn first_candidates(graph:&Graph, max_candidates:usize) -> impl Iterator<Item=Pair> + '_ {
    let limit = if max_candidates > 0 { max_candidates } else { usize::MAX };
    graph.non_adjacent_pairs().take(limit)
}
