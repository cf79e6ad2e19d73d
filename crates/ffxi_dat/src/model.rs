//! Destination of decoded records.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::action::{AbilityRecast, Action};
use crate::item::{Item, MonstrosityItem};
use crate::spell::Spell;

/// Receives records as they are decoded
pub trait ResourceSink {
    fn add_action(&mut self, action: Action);

    fn add_actions(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.add_action(action);
        }
    }

    fn add_ability_recasts(&mut self, recasts: Vec<AbilityRecast>);

    fn add_spell(&mut self, spell: Spell);

    /// Remove every spell added so far with `id`
    fn remove_spell(&mut self, id: i16);

    fn add_item(&mut self, item: Item);

    fn add_monstrosity(&mut self, item: MonstrosityItem);
}

/// In-memory collection of everything decoded
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ResourceModel {
    pub actions: Vec<Action>,
    pub ability_recasts: Vec<AbilityRecast>,
    pub spells: Vec<Spell>,
    pub items: Vec<Item>,
    pub monstrosity: Vec<MonstrosityItem>,
}

impl ResourceModel {
    pub fn new() -> ResourceModel {
        ResourceModel::default()
    }

    /// Whether nothing has been decoded into this model
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
            && self.ability_recasts.is_empty()
            && self.spells.is_empty()
            && self.items.is_empty()
            && self.monstrosity.is_empty()
    }
}

impl ResourceSink for ResourceModel {
    fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    fn add_actions(&mut self, actions: Vec<Action>) {
        self.actions.extend(actions);
    }

    fn add_ability_recasts(&mut self, recasts: Vec<AbilityRecast>) {
        self.ability_recasts.extend(recasts);
    }

    fn add_spell(&mut self, spell: Spell) {
        self.spells.push(spell);
    }

    fn remove_spell(&mut self, id: i16) {
        self.spells.retain(|spell| spell.id != id);
    }

    fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    fn add_monstrosity(&mut self, item: MonstrosityItem) {
        self.monstrosity.push(item);
    }
}

#[cfg(test)]
mod test {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn remove_every_matching_spell() {
        let mut model = ResourceModel::new();
        let spell = |id| Spell {
            id,
            kind: crate::spell::MagicType::None,
            prefix: None,
            element: 0,
            targets: 0,
            skill: 0,
            mp_cost: 0,
            cast_time: 0.0,
            recast: 0.0,
            levels: Default::default(),
            recast_id: id,
            icon_id_nq: 0,
            icon_id: 0,
            requirements: 0,
            range: 0,
        };

        model.add_spell(spell(0));
        model.add_spell(spell(1));
        model.add_spell(spell(0));
        model.remove_spell(0);

        assert_eq!(model.spells, vec![spell(1)]);
    }

    #[test]
    fn empty_until_something_is_added() {
        let mut model = ResourceModel::new();
        assert!(model.is_empty());

        model.add_monstrosity(MonstrosityItem {
            id: 1,
            tp_moves: IndexMap::new(),
            english: None,
            japanese: None,
        });
        assert!(!model.is_empty());
    }
}
