use super::{ClassId, ClassMetaData, Cx, MetaDataRegistry, TypeResolver};
use crate::Result;

/// Runs the populate and initialise passes over a unit of work.
#[derive(Debug, Default)]
pub struct Builder {
    options: Options,
}

/// Settings consulted while populating.
#[derive(Debug, Clone)]
pub struct Options {
    /// Package tried after the owning class's package when qualifying a bare
    /// type name
    pub builtin_package: String,

    /// Type assumed for elements, keys and values declared nowhere
    pub top_type: String,

    /// Forwarded to the resolver untouched
    pub class_loader_hint: Option<String>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin_package(&mut self, package: &str) -> &mut Self {
        self.options.builtin_package = package.to_string();
        self
    }

    pub fn top_type(&mut self, name: &str) -> &mut Self {
        self.options.top_type = name.to_string();
        self
    }

    pub fn class_loader_hint(&mut self, hint: &str) -> &mut Self {
        self.options.class_loader_hint = Some(hint.to_string());
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Populates every class, then initialises every class.
    ///
    /// Classes are numbered in the order given. The first error aborts the
    /// whole unit of work.
    pub fn build(
        &self,
        mut classes: Vec<ClassMetaData>,
        resolver: &dyn TypeResolver,
        registry: &dyn MetaDataRegistry,
    ) -> Result<Vec<ClassMetaData>> {
        let cx = Cx::new(resolver, registry, &self.options);

        for (index, class) in classes.iter_mut().enumerate() {
            class.set_id(ClassId(index));
        }

        for class in &mut classes {
            class.populate(&cx).map_err(|err| {
                err.context(crate::err!("failed to populate class `{}`", class.full_name()))
            })?;
        }

        for class in &mut classes {
            class.initialise(&cx).map_err(|err| {
                err.context(crate::err!(
                    "failed to initialise class `{}`",
                    class.full_name()
                ))
            })?;
        }

        tracing::debug!(classes = classes.len(), "mapping metadata ready");
        Ok(classes)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            builtin_package: "java.lang".to_string(),
            top_type: "java.lang.Object".to_string(),
            class_loader_hint: None,
        }
    }
}
