// stagehand/src/pipeline/hooks.rs

//! Observer hooks fired around every stage that actually runs. Hooks see the
//! stage header (and, afterwards, its record) but cannot change control flow.

use crate::pipeline::definition::Pipeline;
use crate::pipeline::run::{StageHeader, StageRecord};

pub type BeforeStageHook = Box<dyn Fn(&StageHeader) + Send + Sync>;
pub type AfterStageHook = Box<dyn Fn(&StageHeader, &StageRecord) + Send + Sync>;

impl<TData> Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  /// Registers a hook invoked right before each stage's action.
  /// Hooks run in registration order.
  pub fn before_each(&mut self, hook: impl Fn(&StageHeader) + Send + Sync + 'static) -> &mut Self {
    self.before_each.push(Box::new(hook));
    self
  }

  /// Registers a hook invoked right after each stage's action, whether it
  /// succeeded or failed.
  pub fn after_each(&mut self, hook: impl Fn(&StageHeader, &StageRecord) + Send + Sync + 'static) -> &mut Self {
    self.after_each.push(Box::new(hook));
    self
  }

  pub(crate) fn fire_before(&self, header: &StageHeader) {
    for hook in &self.before_each {
      hook(header);
    }
  }

  pub(crate) fn fire_after(&self, header: &StageHeader, record: &StageRecord) {
    for hook in &self.after_each {
      hook(header, record);
    }
  }
}
