use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::side::Side;


// Who makes the first move. Decided by the host when the game starts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum FirstMove {
    Host,
    Guest,
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub first_move: FirstMove,
}

impl FirstMove {
    // Returns the starting turn-holder from the host's point of view.
    pub fn resolve(self, rng: &mut impl Rng) -> Side {
        match self {
            FirstMove::Host => Side::Local,
            FirstMove::Guest => Side::Remote,
            FirstMove::Random => {
                if rng.random_bool(0.5) {
                    Side::Local
                } else {
                    Side::Remote
                }
            }
        }
    }
}

impl Rules {
    pub fn host_first() -> Self { Rules { first_move: FirstMove::Host } }
}

impl Default for Rules {
    fn default() -> Self { Rules { first_move: FirstMove::Random } }
}
