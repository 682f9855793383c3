use {
    super::{capitalize_keys, pascal_case_key, to_wire, Shape},
    crate::{
        Action, Condition, Effect, NoTokens, Resolution, Scope, StackPolicyDocument, StackPolicyError, Statement,
        TokenResolver,
    },
    indoc::indoc,
    pretty_assertions::assert_eq,
    serde::{ser::Error as _, Serialize, Serializer},
    serde_json::{json, Value},
    std::{borrow::Cow, str::FromStr, sync::Arc},
};

fn wire(value: &Value) -> Value {
    capitalize_keys(Some(value), &NoTokens).unwrap()
}

#[test_log::test]
fn test_pascal_case_key() {
    assert_eq!(pascal_case_key("statement"), "Statement");
    assert_eq!(pascal_case_key("stringEquals"), "StringEquals");
    assert_eq!(pascal_case_key("resourceType"), "ResourceType");
    assert_eq!(pascal_case_key("notResource"), "NotResource");
    assert_eq!(pascal_case_key("x"), "X");
    assert_eq!(pascal_case_key("éclair"), "Éclair");

    // Already canonical, or nothing to uppercase.
    assert_eq!(pascal_case_key("StringEquals"), "StringEquals");
    assert_eq!(pascal_case_key(""), "");
    assert_eq!(pascal_case_key("1st"), "1st");
    assert_eq!(pascal_case_key("_private"), "_private");
    assert_eq!(pascal_case_key("aws:SourceIp"), "Aws:SourceIp");

    assert!(matches!(pascal_case_key("Effect"), Cow::Borrowed(_)));
    assert!(matches!(pascal_case_key("effect"), Cow::Owned(_)));
}

#[test_log::test]
fn test_shape() {
    let object = json!({"a": 1});
    let array = json!([1, 2]);
    let scalar = json!("s");
    let null = Value::Null;

    assert!(matches!(Shape::of(Some(&object)), Shape::Object(m) if m.len() == 1));
    assert!(matches!(Shape::of(Some(&array)), Shape::Array(a) if a.len() == 2));
    assert_eq!(Shape::of(Some(&scalar)), Shape::Scalar(&scalar));
    assert_eq!(Shape::of(Some(&null)), Shape::Scalar(&null));
    assert_eq!(Shape::of(None), Shape::Absent);
}

#[test_log::test]
fn test_scalars_pass_through() {
    for scalar in [json!("update"), json!(42), json!(-1.5), json!(true), json!(false), Value::Null] {
        assert_eq!(wire(&scalar), scalar);
    }
    assert_eq!(capitalize_keys(None, &NoTokens), None);
}

#[test_log::test]
fn test_nested_keys() {
    let input = json!({
        "outerKey": {
            "innerKey": [
                {"deepKey": 1, "otherKey": [{"deepestKey": null}]},
                "plainString",
                [{"inArray": true}]
            ]
        },
        "Already": {"mixedCase": "valueIsNotChanged"}
    });

    assert_eq!(
        wire(&input),
        json!({
            "OuterKey": {
                "InnerKey": [
                    {"DeepKey": 1, "OtherKey": [{"DeepestKey": null}]},
                    "plainString",
                    [{"InArray": true}]
                ]
            },
            "Already": {"MixedCase": "valueIsNotChanged"}
        })
    );
}

#[test_log::test]
fn test_empty_containers() {
    assert_eq!(wire(&json!({})), json!({}));
    assert_eq!(wire(&json!([])), json!([]));
    assert_eq!(wire(&json!({"emptyList": [], "emptyMap": {}})), json!({"EmptyList": [], "EmptyMap": {}}));
}

#[test_log::test]
fn test_key_order_preserved() {
    let input = json!({"zeta": 1, "alpha": 2, "mu": 3});
    let keys: Vec<String> = wire(&input).as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Zeta", "Alpha", "Mu"]);
}

#[test_log::test]
fn test_key_collision_last_wins() {
    let input = json!({"effect": "Allow", "Effect": "Deny"});
    assert_eq!(wire(&input), json!({"Effect": "Deny"}));
}

#[test_log::test]
fn test_idempotent() {
    let input = json!({
        "statement": [{
            "effect": "Allow",
            "notAction": "Update:Delete",
            "notResource": ["LogicalResourceId/MyTable"],
            "condition": {"stringEquals": {"resourceType": ["AWS::DynamoDB::Table"]}}
        }]
    });

    let once = wire(&input);
    let twice = wire(&once);
    assert_eq!(twice, once);
    assert_eq!(
        once["Statement"][0].as_object().unwrap().keys().cloned().collect::<Vec<_>>(),
        vec!["Effect", "NotAction", "NotResource", "Condition"]
    );
}

#[test_log::test]
fn test_does_not_mutate_input() {
    let input = json!({"statement": [{"effect": "Deny", "resource": "${Token[Gone]}"}]});
    let before = input.clone();
    let scope = Scope::root("App").unwrap().with_absent_token("Gone");

    let first = capitalize_keys(Some(&input), &scope);
    let second = capitalize_keys(Some(&input), &scope);
    assert_eq!(input, before);
    assert_eq!(first, second);
    assert_eq!(first.unwrap(), json!({"Statement": [{"Effect": "Deny"}]}));
}

#[test_log::test]
fn test_tokens() {
    let root = Arc::new(
        Scope::root("App")
            .unwrap()
            .with_token("Bucket", "LogicalResourceId/MyBucket")
            .with_token("Types", json!({"resourceType": ["AWS::S3::Bucket"]}))
            .with_token("Chained", "${Token[Bucket]}")
            .with_absent_token("NoValue"),
    );
    let scope = Scope::child(&root, "Stack").unwrap();

    let input = json!({
        "resource": ["${Token[Bucket]}", "${Token[NoValue]}", "${Token[Unknown]}", "MyTable"],
        "condition": {"stringEquals": "${Token[Types]}"},
        "optional": "${Token[NoValue]}",
        "chained": "${Token[Chained]}"
    });

    assert_eq!(
        capitalize_keys(Some(&input), &scope).unwrap(),
        json!({
            "Resource": ["LogicalResourceId/MyBucket", "${Token[Unknown]}", "MyTable"],
            "Condition": {"StringEquals": {"ResourceType": ["AWS::S3::Bucket"]}},
            "Chained": "${Token[Bucket]}"
        })
    );

    // A top-level token with no value is absent.
    assert_eq!(capitalize_keys(Some(&json!("${Token[NoValue]}")), &scope), None);
    assert_eq!(to_wire("${Token[NoValue]}", &scope).unwrap(), Value::Null);
}

struct UpperResolver;

impl TokenResolver for UpperResolver {
    fn resolve_token(&self, candidate: &str) -> Resolution {
        match candidate.strip_prefix("ref:") {
            Some(name) => Resolution::Value(json!({"ref": name.to_uppercase()})),
            None => Resolution::Unresolved,
        }
    }
}

#[test_log::test]
fn test_custom_resolver() {
    let input = json!({"resource": ["ref:bucket", "table"]});
    let resolver: &dyn TokenResolver = &UpperResolver;
    assert_eq!(
        capitalize_keys(Some(&input), resolver).unwrap(),
        json!({"Resource": [{"Ref": "BUCKET"}, "table"]})
    );
}

#[test_log::test]
fn test_resource_shape_preserved() {
    let single = StackPolicyDocument::new(vec![Statement::action_resource(Effect::Allow, Action::Any, "MyBucket")]);
    let out = to_wire(&single, &NoTokens).unwrap();
    assert_eq!(out["Statement"][0]["Resource"], json!("MyBucket"));

    let one = StackPolicyDocument::new(vec![Statement::action_resource(Effect::Allow, Action::Any, vec!["MyBucket"])]);
    let out = to_wire(&one, &NoTokens).unwrap();
    assert_eq!(out["Statement"][0]["Resource"], json!(["MyBucket"]));

    let names: Vec<String> = (0..7).map(|i| format!("Resource{i}")).collect();
    let many = StackPolicyDocument::new(vec![Statement::action_not_resource(Effect::Deny, Action::Any, names.clone())]);
    let out = to_wire(&many, &NoTokens).unwrap();
    assert_eq!(out["Statement"][0]["NotResource"], json!(names));
}

#[test_log::test]
fn test_condition_omitted() {
    let s = Statement::not_action_resource(Effect::Allow, Action::Delete, "*");
    let out = to_wire(&s, &NoTokens).unwrap();
    let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["Effect", "NotAction", "Principal", "Resource"]);
    assert!(out.get("Condition").is_none());
}

#[test_log::test]
fn test_action_order_preserved() {
    let s = Statement::action_resource(Effect::Deny, vec![Action::Modify, Action::Delete], "*");
    let out = to_wire(&s, &NoTokens).unwrap();
    assert_eq!(out["Action"], json!(["Update:Modify", "Update:Delete"]));

    let s = Statement::action_resource(Effect::Deny, vec![Action::Delete, Action::Modify], "*");
    let out = to_wire(&s, &NoTokens).unwrap();
    assert_eq!(out["Action"], json!(["Update:Delete", "Update:Modify"]));
}

#[test_log::test]
fn test_deep_condition() {
    let condition = Condition::string_like(["AWS::EC2::*", "AWS::RDS::*"]);
    assert_eq!(
        to_wire(&json!({"condition": condition}), &NoTokens).unwrap(),
        json!({"Condition": {"StringLike": {"ResourceType": ["AWS::EC2::*", "AWS::RDS::*"]}}})
    );
}

#[test_log::test]
fn test_end_to_end() {
    let document = StackPolicyDocument::new(vec![Statement::action_resource(
        Effect::Deny,
        Action::Replace,
        vec!["MyBucket", "MyTable"],
    )]);
    let out = to_wire(&document, &NoTokens).unwrap();
    assert_eq!(
        out,
        json!({
            "Statement": [{
                "Effect": "Deny",
                "Action": "Update:Replace",
                "Principal": "*",
                "Resource": ["MyBucket", "MyTable"]
            }]
        })
    );

    let text = serde_json::to_string(&out).unwrap();
    assert_eq!(
        text,
        r#"{"Statement":[{"Effect":"Deny","Action":"Update:Replace","Principal":"*","Resource":["MyBucket","MyTable"]}]}"#
    );
}

#[test_log::test]
fn test_all_statement_kinds() {
    let document = StackPolicyDocument::from_str(indoc! { r#"
        {
            "statement": [
                {"effect": "Allow", "action": "Update:*", "principal": "*", "resource": "*"},
                {"effect": "Deny", "action": ["Update:Replace"], "principal": "*", "notResource": "A"},
                {"effect": "Deny", "notAction": "Update:Modify", "principal": "*", "resource": ["B"]},
                {
                    "effect": "Allow",
                    "notAction": "Update:Delete",
                    "principal": "*",
                    "notResource": ["C", "D"],
                    "condition": {"stringEquals": {"resourceType": ["AWS::S3::Bucket"]}}
                }
            ]
        }"# })
    .unwrap();

    assert_eq!(
        to_wire(&document, &NoTokens).unwrap(),
        json!({
            "Statement": [
                {"Effect": "Allow", "Action": "Update:*", "Principal": "*", "Resource": "*"},
                {"Effect": "Deny", "Action": ["Update:Replace"], "Principal": "*", "NotResource": "A"},
                {"Effect": "Deny", "NotAction": "Update:Modify", "Principal": "*", "Resource": ["B"]},
                {
                    "Effect": "Allow",
                    "NotAction": "Update:Delete",
                    "Principal": "*",
                    "NotResource": ["C", "D"],
                    "Condition": {"StringEquals": {"ResourceType": ["AWS::S3::Bucket"]}}
                }
            ]
        })
    );
}

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("handle is not resolved"))
    }
}

#[test_log::test]
fn test_serialize_failure() {
    let e = to_wire(&Unserializable, &NoTokens).unwrap_err();
    assert_eq!(e, StackPolicyError::Serialization("handle is not resolved".to_string()));
}
