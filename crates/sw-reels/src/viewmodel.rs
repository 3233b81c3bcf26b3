//! View-models over the reels model

use std::sync::Arc;

use sw_core::{Observable, ReelsSize, Subscriber};

use crate::model::{Lines, SlotReelsModel, Wins};
use crate::strings::Strings;

const TRY_AGAIN_KEY: &str = "try_again";
const WIN_KEY: &str = "win";

/// View-model mirroring the reel grid for the animation layer
pub struct SlotReelsViewModel {
    model: Arc<SlotReelsModel>,
    lines: Observable<Lines>,
    reels_size: Observable<ReelsSize>,
    #[allow(dead_code)]
    subscriber: Subscriber,
}

impl SlotReelsViewModel {
    pub fn new(model: Arc<SlotReelsModel>) -> Self {
        let lines = Observable::new(model.lines().get());
        let reels_size = Observable::new(model.reels_size().get());

        let mut subscriber = Subscriber::new();
        {
            let lines = lines.clone();
            subscriber.subscribe(&model.lines(), move |value: &Lines| {
                lines.set(value.clone());
            });
        }
        {
            let reels_size = reels_size.clone();
            subscriber.subscribe(&model.reels_size(), move |value: &ReelsSize| {
                reels_size.set(*value);
            });
        }

        Self {
            model,
            lines,
            reels_size,
            subscriber,
        }
    }

    /// Trigger one spin on the underlying model
    pub fn spin(&self) {
        self.model.spin();
    }

    pub fn lines(&self) -> Observable<Lines> {
        self.lines.clone()
    }

    pub fn reels_size(&self) -> Observable<ReelsSize> {
        self.reels_size.clone()
    }
}

/// View-model owning the localized result title
pub struct SlotMachineViewModel {
    title: Observable<String>,
    #[allow(dead_code)]
    subscriber: Subscriber,
}

impl SlotMachineViewModel {
    pub fn new(model: &SlotReelsModel, strings: Arc<dyn Strings>) -> Self {
        let title = Observable::new(strings.get(TRY_AGAIN_KEY));

        let mut subscriber = Subscriber::new();
        {
            let title = title.clone();
            subscriber.subscribe(&model.wins(), move |wins: &Wins| {
                let key = if wins.is_empty() { TRY_AGAIN_KEY } else { WIN_KEY };
                title.set(strings.get(key));
            });
        }

        Self { title, subscriber }
    }

    pub fn title(&self) -> Observable<String> {
        self.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::DefaultStrings;
    use sw_core::{
        FullLinesConfig, FullLinesMachine, ScriptedRandom, SymbolSet, shared_random,
    };

    fn symbols() -> SymbolSet {
        SymbolSet::of(&["A", "B", "C", "D", "E"]).unwrap()
    }

    /// 2x1 model whose next spin draws the given unit values
    fn model_with_script(values: Vec<f64>) -> Arc<SlotReelsModel> {
        let random = shared_random(ScriptedRandom::new(values));
        let machine = FullLinesMachine::new(
            FullLinesConfig {
                width: 2,
                height: 1,
                symbols: symbols(),
            },
            random.clone(),
        )
        .unwrap();
        Arc::new(SlotReelsModel::new(&symbols(), 2, 1, Box::new(machine), &random))
    }

    #[test]
    fn test_reels_vm_mirrors_model() {
        // 2 initial draws, then a spin drawing A B
        let model = model_with_script(vec![0.5, 0.5, 0.1, 0.3]);
        let vm = SlotReelsViewModel::new(model);

        assert_eq!(vm.reels_size().get(), ReelsSize { reels: 2, rows: 1 });
        assert_eq!(vm.lines().get(), vec![vec!["C", "C"]]);

        vm.spin();
        assert_eq!(vm.lines().get(), vec![vec!["A", "B"]]);
    }

    #[test]
    fn test_title_switches_on_win() {
        // Initial fill C C, spin 1 draws A B (no win), spin 2 draws D D (win)
        let model = model_with_script(vec![0.5, 0.5, 0.1, 0.3, 0.7, 0.7]);
        let vm = SlotMachineViewModel::new(&model, Arc::new(DefaultStrings::new()));

        assert_eq!(vm.title().get(), "Try again");

        model.spin();
        assert_eq!(vm.title().get(), "Try again");

        model.spin();
        assert_eq!(vm.title().get(), "You win!");
    }
}
