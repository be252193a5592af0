mod policy_evaluator;

pub use policy_evaluator::PolicyEvaluator;
