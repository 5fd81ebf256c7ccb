use crate::errors::Result;
use crate::evaluation::Evaluator;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

pub type EvaluatorConstructor = Arc<dyn Fn() -> Result<Box<dyn Evaluator>> + Send + Sync>;

static EVALUATOR_REGISTRY: Lazy<RwLock<HashMap<String, EvaluatorConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_evaluator_plugin<S: Into<String>>(name: S, constructor: EvaluatorConstructor) {
    let name = name.into();
    let mut registry = EVALUATOR_REGISTRY
        .write()
        .expect("Evaluator registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_evaluator_plugin(name: &str) -> Option<EvaluatorConstructor> {
    EVALUATOR_REGISTRY
        .read()
        .expect("Evaluator registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_evaluator_registry() {
    let registry = EVALUATOR_REGISTRY
        .read()
        .expect("Evaluator registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No evaluator plugins registered.");
    } else {
        tracing::debug!("Registered evaluator plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

/// 声明并注册评分引擎插件
///
/// 插件类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_evaluator_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_evaluator_plugin_ $plugin:snake>]() {
                $crate::evaluation::register::register_evaluator_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        let plugin = <$plugin>::new()
                            .map_err($crate::errors::GradeSmartError::evaluation)?;
                        Ok(Box::new(plugin) as Box<dyn $crate::evaluation::Evaluator>)
                    }),
                );
            }
        }
    };
}
