use crate::data::{Dir, Pos};
use crate::map::GoalMap;
use crate::moves::Move;

/// Boxes are always sorted so two states with the same physical configuration
/// are equal and hash equally no matter which box moved where.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub(crate) player_pos: Pos,
    pub(crate) boxes: Vec<Pos>,
}

impl State {
    pub fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort(); // sort to detect equal states when we reorder boxes
        State { player_pos, boxes }
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    /// Canonical key: `x,y|x,y|...` - player first, then the sorted boxes.
    pub fn encode(&self) -> String {
        let mut key = self.player_pos.to_string();
        for b in &self.boxes {
            key.push('|');
            key.push_str(&b.to_string());
        }
        key
    }

    /// The one transition rule shared by the search and by replaying solutions.
    ///
    /// Returns `None` if the player would walk into a wall (or leave the grid)
    /// or push a box into a wall or another box.
    pub fn step(&self, map: &GoalMap, dir: Dir) -> Option<(State, Move)> {
        let new_player_pos = self.player_pos + dir;
        if map.grid.is_wall(new_player_pos) {
            return None;
        }

        match self.boxes.binary_search(&new_player_pos) {
            Err(_) => Some((
                State {
                    player_pos: new_player_pos,
                    boxes: self.boxes.clone(),
                },
                Move::new(dir, false),
            )),
            Ok(box_index) => {
                let push_dest = new_player_pos + dir;
                if map.grid.is_wall(push_dest) || self.has_box(push_dest) {
                    return None;
                }
                let mut new_boxes = self.boxes.clone();
                new_boxes[box_index] = push_dest;
                Some((State::new(new_player_pos, new_boxes), Move::new(dir, true)))
            }
        }
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// Every box is on a goal.
    pub fn is_solved(&self, map: &GoalMap) -> bool {
        self.boxes.iter().all(|&b| map.is_goal(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::level::Level;

    #[test]
    fn canonical_encoding() {
        let a = Pos::new(1, 2);
        let b = Pos::new(3, 1);
        let c = Pos::new(1, 4);
        let player = Pos::new(2, 2);

        let s1 = State::new(player, vec![a, b, c]);
        let s2 = State::new(player, vec![c, b, a]);
        let s3 = State::new(player, vec![b, a, c]);
        assert_eq!(s1, s2);
        assert_eq!(s1.encode(), s2.encode());
        assert_eq!(s1.encode(), s3.encode());
        assert_eq!(s1.encode(), "2,2|2,1|4,1|1,3");

        let moved = State::new(Pos::new(2, 3), vec![a, b, c]);
        assert_ne!(s1.encode(), moved.encode());
    }

    #[test]
    fn stepping() {
        let level: Level = r"
#######
#  $$ #
# @$ .#
#  . .#
#######
"
        .parse()
        .unwrap();
        let state = &level.state;

        // walk
        let (walked, mov) = state.step(&level.map, Dir::Left).unwrap();
        assert_eq!(walked.player_pos, Pos::new(2, 1));
        assert_eq!(walked.boxes, state.boxes);
        assert!(!mov.is_push());

        // push
        let (pushed, mov) = state.step(&level.map, Dir::Right).unwrap();
        assert!(mov.is_push());
        assert_eq!(pushed.player_pos, Pos::new(2, 3));
        assert!(pushed.has_box(Pos::new(2, 4)));
        assert!(!pushed.has_box(Pos::new(2, 3)));

        // push into another box
        let blocked = State::new(Pos::new(1, 2), state.boxes.clone());
        assert!(blocked.step(&level.map, Dir::Right).is_none());

        // walk into a wall
        let cornered = State::new(Pos::new(1, 1), state.boxes.clone());
        assert!(cornered.step(&level.map, Dir::Up).is_none());
        assert!(cornered.step(&level.map, Dir::Left).is_none());
    }

    #[test]
    fn leaving_the_grid_is_blocked() {
        let level: Level = "@$.".parse().unwrap();
        assert!(level.state.step(&level.map, Dir::Left).is_none());
        assert!(level.state.step(&level.map, Dir::Up).is_none());
        let (pushed, _) = level.state.step(&level.map, Dir::Right).unwrap();
        assert!(pushed.is_solved(&level.map));
        assert!(pushed.step(&level.map, Dir::Right).is_none());
    }
}
