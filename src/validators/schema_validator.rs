use crate::collectors::{ErrorCollector, FlatErrorCollector, MapErrorCollector};
use crate::context::Context;
use crate::errors::ValidationError;
use crate::presenters::Presenter;
use crate::schema::{ExtraFields, Schema, Shape};
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

pub const ROOT: &str = "$";

static ABSENT: Value = Value::Null;

/// The location of the node being visited. Each child gets its own copy of
/// the path, so siblings never see each other's segments.
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    pub ctx: &'a Context,
    pub path: Vec<String>,
}

impl<'a> ValidationContext<'a> {
    pub fn root(ctx: &'a Context) -> Self {
        Self {
            ctx,
            path: vec![ROOT.to_string()],
        }
    }

    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().cloned());
        path.push(segment.into());

        Self {
            ctx: self.ctx,
            path,
        }
    }

    fn report(&self, collector: &mut dyn ErrorCollector, error: ValidationError) {
        collector.collect(self.ctx, &self.path, error);
    }
}

/// Walks a value against a schema and hands every error to a collector.
#[derive(Clone)]
pub struct SchemaValidator {
    path_presenter: Arc<dyn Presenter>,
    error_presenter: Arc<dyn Presenter>,
}

impl SchemaValidator {
    pub fn new(
        path_presenter: impl Presenter + 'static,
        error_presenter: impl Presenter + 'static,
    ) -> Self {
        Self {
            path_presenter: Arc::new(path_presenter),
            error_presenter: Arc::new(error_presenter),
        }
    }

    /// Returns the validity flag and the rendered messages grouped by
    /// rendered path.
    pub fn validate(
        &self,
        ctx: &Context,
        value: &Value,
        schema: &Schema,
    ) -> (bool, BTreeMap<String, Vec<String>>) {
        let mut collector =
            MapErrorCollector::new(self.path_presenter.clone(), self.error_presenter.clone());
        self.validate_into(ctx, value, schema, &mut collector);

        (!collector.has_errors(), collector.into_errors())
    }

    /// Returns the validity flag and every error rendered by `combiner`, in
    /// visiting order.
    pub fn validate_flat(
        &self,
        ctx: &Context,
        value: &Value,
        schema: &Schema,
        combiner: impl Presenter + 'static,
    ) -> (bool, Vec<String>) {
        let mut collector = FlatErrorCollector::new(Arc::new(combiner));
        self.validate_into(ctx, value, schema, &mut collector);

        (!collector.has_errors(), collector.into_errors())
    }

    pub fn validate_into(
        &self,
        ctx: &Context,
        value: &Value,
        schema: &Schema,
        collector: &mut dyn ErrorCollector,
    ) {
        let mut count = CountingCollector {
            inner: collector,
            count: 0,
        };
        validate_node(&ValidationContext::root(ctx), value, schema, &mut count);

        debug!(errors = count.count, "validation finished");
    }
}

struct CountingCollector<'c> {
    inner: &'c mut dyn ErrorCollector,
    count: usize,
}

impl ErrorCollector for CountingCollector<'_> {
    fn collect(&mut self, ctx: &Context, path: &[String], error: ValidationError) {
        self.count += 1;
        self.inner.collect(ctx, path, error);
    }

    fn has_errors(&self) -> bool {
        self.inner.has_errors()
    }
}

fn validate_node(
    vctx: &ValidationContext,
    value: &Value,
    schema: &Schema,
    collector: &mut dyn ErrorCollector,
) {
    if value.is_null() {
        if schema.is_required() {
            vctx.report(collector, ValidationError::Required);
        }
        return;
    }

    for validator in schema.validators() {
        let outcome = validator.validate(vctx.ctx, value);
        for error in outcome.errors {
            vctx.report(collector, error);
        }

        if outcome.stop {
            trace!(path = ?vctx.path, "validator stopped the node");
            return;
        }
    }

    match schema.shape() {
        Shape::Scalar => {}
        Shape::Object(fields) => validate_object(vctx, value, fields, schema.extra(), collector),
        Shape::Array(items) => validate_array(vctx, value, items, collector),
    }
}

fn validate_object(
    vctx: &ValidationContext,
    value: &Value,
    fields: &BTreeMap<String, Schema>,
    extra: ExtraFields,
    collector: &mut dyn ErrorCollector,
) {
    let Some(map) = value.as_map() else {
        vctx.report(collector, ValidationError::NotAMap);
        return;
    };

    for (name, field_schema) in fields {
        let field_value = map.get(name).unwrap_or(&ABSENT);
        validate_node(&vctx.push(name.as_str()), field_value, field_schema, collector);
    }

    if extra == ExtraFields::Forbid {
        for key in map.keys().filter(|key| !fields.contains_key(*key)) {
            vctx.report(
                collector,
                ValidationError::UnexpectedField { field: key.clone() },
            );
        }
    }
}

fn validate_array(
    vctx: &ValidationContext,
    value: &Value,
    items: &Schema,
    collector: &mut dyn ErrorCollector,
) {
    let Some(list) = value.as_list() else {
        vctx.report(collector, ValidationError::NotAList);
        return;
    };

    for (index, item) in list.iter().enumerate() {
        validate_node(&vctx.push(format!("[{index}]")), item, items, collector);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::RawErrorCollector;
    use crate::presenters::{CombinedPresenter, PathPresenter, SimpleErrorPresenter};
    use crate::schema::Field;
    use crate::validators::{IsString, MinLength, MinSize, Outcome};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn engine() -> SchemaValidator {
        SchemaValidator::new(PathPresenter::new("."), SimpleErrorPresenter)
    }

    fn value(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn valid_input_has_no_errors() {
        let schema = Schema::object([
            ("name", Schema::string().required()),
            ("tags", Schema::array(Schema::string())),
        ])
        .with_extra(ExtraFields::Forbid);

        let (valid, errors) = engine().validate(
            &Context::background(),
            &value(json!({"name": "Ada", "tags": ["x", "y"]})),
            &schema,
        );

        assert!(valid);
        assert!(errors.is_empty());
    }

    #[test]
    fn required_null_reports_once() {
        let schema = Schema::string().with_validator(MinLength::new(3)).required();
        let (valid, errors) = engine().validate(&Context::background(), &Value::Null, &schema);

        assert!(!valid);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["$"], vec!["required"]);
    }

    #[test]
    fn optional_null_is_valid() {
        let schema = Schema::string().with_validator(MinLength::new(3));
        let (valid, errors) = engine().validate(&Context::background(), &Value::Null, &schema);

        assert!(valid);
        assert!(errors.is_empty());
    }

    #[test]
    fn absent_required_field_is_required_error() {
        let schema = Schema::object([("email", Schema::string().required())]);
        let (_, errors) = engine().validate(&Context::background(), &value(json!({})), &schema);

        assert_eq!(errors["$.email"], vec!["required"]);
    }

    #[test]
    fn forbid_reports_extra_keys_at_object_path() {
        let schema = Schema::object([("a", Schema::string())]).with_extra(ExtraFields::Forbid);
        let input = value(json!({"a": "x", "zeta": 1, "beta": 2}));

        let (valid, errors) = engine().validate(&Context::background(), &input, &schema);
        assert!(!valid);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors["$"],
            vec!["unexpected field beta", "unexpected field zeta"]
        );

        let ignoring = Schema::object([("a", Schema::string())]);
        let (valid, _) = engine().validate(&Context::background(), &input, &ignoring);
        assert!(valid);
    }

    #[test]
    fn nested_paths_are_rendered() {
        let schema = Schema::object([(
            "users",
            Schema::array(Schema::object([
                ("name", Schema::string()),
                ("address", Schema::object([("city", Schema::string())])),
            ])),
        )]);
        let input = value(json!({"users": [{"name": "A", "address": {"city": 5}}]}));

        let (_, errors) = engine().validate(&Context::background(), &input, &schema);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["$.users[0].address.city"], vec!["not a string"]);
    }

    #[test]
    fn error_order_is_stable() {
        let schema = Schema::object([
            ("c", Schema::string().required()),
            ("a", Schema::string().required()),
            ("b", Schema::integer()),
        ]);
        let input = value(json!({"b": "x"}));
        let ctx = Context::background();

        let (_, first) = engine().validate_flat(&ctx, &input, &schema, CombinedPresenter::new(".", ": "));
        for _ in 0..10 {
            let (_, again) =
                engine().validate_flat(&ctx, &input, &schema, CombinedPresenter::new(".", ": "));
            assert_eq!(first, again);
        }
        assert_eq!(
            first,
            vec!["$.a: required", "$.b: not an integer", "$.c: required"]
        );
    }

    #[test]
    fn stop_halts_validators_and_descent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let schema = Schema::new()
            .with_validator(|_: &Context, _: &Value| {
                Outcome::fail(ValidationError::custom("first", "first"))
            })
            .with_validator(|_: &Context, _: &Value| {
                Outcome::stop(ValidationError::custom("blocking", "blocked"))
            })
            .with_validator(move |_: &Context, _: &Value| {
                counter.fetch_add(1, Ordering::SeqCst);
                Outcome::pass()
            })
            .with_fields([Field::new("name").required()])
            .unwrap();

        let (_, errors) = engine().validate(&Context::background(), &value(json!({})), &schema);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["$"], vec!["first", "blocked"]);
    }

    #[test]
    fn non_blocking_bounds_still_descend() {
        let schema = Schema::array(Schema::string()).with_validator(MinSize::new(3));
        let (_, errors) =
            engine().validate(&Context::background(), &value(json!(["a", 1])), &schema);

        assert_eq!(errors["$"], vec!["min size 3, actual size 2"]);
        assert_eq!(errors["$[1]"], vec!["not a string"]);
    }

    #[test]
    fn array_item_error_path() {
        let schema = Schema::array(Schema::string().required()).required();
        let (valid, errors) = engine().validate(
            &Context::background(),
            &value(json!(["one", 2, "three"])),
            &schema,
        );

        assert!(!valid);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["$[1]"], vec!["not a string"]);
    }

    #[test]
    fn wrong_container_kinds() {
        let object = Schema::object([("a", Schema::string())]);
        let (_, errors) = engine().validate(&Context::background(), &value(json!([1])), &object);
        assert_eq!(errors["$"], vec!["not a map"]);

        let items = Schema::new().with_items(Schema::string()).unwrap();
        let (_, errors) = engine().validate(&Context::background(), &value(json!("x")), &items);
        assert_eq!(errors["$"], vec!["not a list"]);
    }

    #[test]
    fn raw_collection_keeps_segments() {
        let schema = Schema::object([("tags", Schema::array(Schema::of(IsString)))]);
        let mut collector = RawErrorCollector::new();
        engine().validate_into(
            &Context::background(),
            &value(json!({"tags": [true]})),
            &schema,
            &mut collector,
        );

        assert_eq!(
            collector.into_errors(),
            vec![(
                vec!["$".to_string(), "tags".to_string(), "[0]".to_string()],
                ValidationError::NotAString
            )]
        );
    }

    #[test]
    fn push_copies_the_path() {
        let ctx = Context::background();
        let root = ValidationContext::root(&ctx);
        let left = root.push("a");
        let right = root.push("b");

        assert_eq!(root.path, vec!["$"]);
        assert_eq!(left.path, vec!["$", "a"]);
        assert_eq!(right.path, vec!["$", "b"]);
    }
}
