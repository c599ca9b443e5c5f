//! Static type mapping tables.
//!
//! Three vocabularies meet here:
//!
//! - UML metaclass names (`Class`, `Dependency`) from `xmi:type`
//! - ArchiMate profile tag local names (`ArchiMate_BusinessActor`)
//! - BPMN profile tag local names (`Activity`, `ExclusiveGateway`)
//!
//! Each is translated into the modeling tool's own qualified type ids
//! (`uml.class`, `archimate.businessActor`, `bpmn.gatewayExclusive`).
//! Profile tokens are compared through a normalized key (lowercase ASCII
//! alphanumerics, family prefix and version digits stripped) so that the
//! many spellings EA has used over the years land on the same entry.

use std::sync::LazyLock;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::classify::{Family, UmlRelationKind};

// ============================================================================
// UML
// ============================================================================

/// UML metaclass → element type.
const UML_ELEMENT_TYPES: &[(&str, &str)] = &[
    ("Class", "uml.class"),
    ("AssociationClass", "uml.associationClass"),
    ("Interface", "uml.interface"),
    ("DataType", "uml.dataType"),
    ("PrimitiveType", "uml.primitiveType"),
    ("Enumeration", "uml.enumeration"),
    ("Signal", "uml.signal"),
    ("Component", "uml.component"),
    ("Node", "uml.node"),
    ("Device", "uml.device"),
    ("ExecutionEnvironment", "uml.executionEnvironment"),
    ("Artifact", "uml.artifact"),
    ("Actor", "uml.actor"),
    ("UseCase", "uml.useCase"),
    ("Collaboration", "uml.collaboration"),
    ("InstanceSpecification", "uml.object"),
    ("Activity", "uml.activity"),
    ("InitialNode", "uml.initialNode"),
    ("ActivityFinalNode", "uml.activityFinalNode"),
    ("FlowFinalNode", "uml.flowFinalNode"),
    ("DecisionNode", "uml.decisionNode"),
    ("MergeNode", "uml.mergeNode"),
    ("ForkNode", "uml.forkNode"),
    ("JoinNode", "uml.joinNode"),
    ("CentralBufferNode", "uml.objectNode"),
    ("DataStoreNode", "uml.dataStoreNode"),
    ("ActivityPartition", "uml.activityPartition"),
    ("StateMachine", "uml.stateMachine"),
    ("State", "uml.state"),
    ("FinalState", "uml.finalState"),
    ("Pseudostate", "uml.pseudostate"),
    ("Interaction", "uml.interaction"),
];

/// Qualified type for every `*Action` metaclass.
pub const UML_ACTION_TYPE: &str = "uml.action";

/// Action metaclasses that carry no extra meaning.
const GENERIC_ACTIONS: &[&str] = &["Action", "OpaqueAction"];

/// UML metaclass → (endpoint policy, relationship type).
const UML_RELATIONSHIP_TYPES: &[(&str, UmlRelationKind, &str)] = &[
    ("Generalization", UmlRelationKind::Generalization, "uml.generalization"),
    ("Include", UmlRelationKind::Include, "uml.include"),
    ("Extend", UmlRelationKind::Extend, "uml.extend"),
    ("Dependency", UmlRelationKind::DependencyLike, "uml.dependency"),
    ("Usage", UmlRelationKind::DependencyLike, "uml.usage"),
    ("Abstraction", UmlRelationKind::DependencyLike, "uml.abstraction"),
    ("Realization", UmlRelationKind::DependencyLike, "uml.realization"),
    ("InterfaceRealization", UmlRelationKind::DependencyLike, "uml.realization"),
    ("Substitution", UmlRelationKind::DependencyLike, "uml.substitution"),
    ("ControlFlow", UmlRelationKind::ActivityEdge, "uml.controlFlow"),
    ("ObjectFlow", UmlRelationKind::ActivityEdge, "uml.objectFlow"),
    ("InformationFlow", UmlRelationKind::InformationFlow, "uml.informationFlow"),
    ("Association", UmlRelationKind::Association, "uml.association"),
    ("Transition", UmlRelationKind::Transition, "uml.transition"),
];

/// Dependency stereotypes that promote the relationship to its own type.
const UML_STEREOTYPE_OVERRIDES: &[(&str, &str)] = &[("include", "uml.include"), ("extend", "uml.extend")];

/// Element type for a UML metaclass.
pub fn uml_element_type(metaclass: &str) -> Option<&'static str> {
    if let Some((_, t)) = UML_ELEMENT_TYPES
        .iter()
        .find(|(m, _)| m.eq_ignore_ascii_case(metaclass))
    {
        return Some(t);
    }
    is_action_metaclass(metaclass).then_some(UML_ACTION_TYPE)
}

fn is_action_metaclass(metaclass: &str) -> bool {
    metaclass.len() >= "Action".len()
        && metaclass.is_char_boundary(metaclass.len() - "Action".len())
        && metaclass[metaclass.len() - "Action".len()..].eq_ignore_ascii_case("Action")
}

/// The `actionKind` to record for an action metaclass, if it is specific.
pub fn uml_action_kind(metaclass: &str) -> Option<&str> {
    (is_action_metaclass(metaclass)
        && !GENERIC_ACTIONS.iter().any(|g| g.eq_ignore_ascii_case(metaclass)))
    .then_some(metaclass)
}

/// Endpoint policy and default type for a relationship metaclass.
pub fn uml_relationship_kind(metaclass: &str) -> Option<(UmlRelationKind, &'static str)> {
    UML_RELATIONSHIP_TYPES
        .iter()
        .find(|(m, _, _)| m.eq_ignore_ascii_case(metaclass))
        .map(|(_, k, t)| (*k, *t))
}

/// Relationship type for a metaclass, honoring stereotype overrides on
/// dependency-shaped records (`Dependency` + `include` → `uml.include`).
pub fn uml_relationship_type(metaclass: &str, stereotype: Option<&str>) -> Option<&'static str> {
    let (kind, default) = uml_relationship_kind(metaclass)?;
    if kind == UmlRelationKind::DependencyLike {
        if let Some(stereo) = stereotype.map(str::trim) {
            if let Some((_, t)) = UML_STEREOTYPE_OVERRIDES
                .iter()
                .find(|(s, _)| s.eq_ignore_ascii_case(stereo))
            {
                return Some(t);
            }
        }
    }
    Some(default)
}

// ============================================================================
// PROFILE CATALOGUES
// ============================================================================

const ARCHIMATE_ELEMENT_TYPES: &[&str] = &[
    "archimate.businessActor",
    "archimate.businessRole",
    "archimate.businessCollaboration",
    "archimate.businessInterface",
    "archimate.businessProcess",
    "archimate.businessFunction",
    "archimate.businessInteraction",
    "archimate.businessEvent",
    "archimate.businessService",
    "archimate.businessObject",
    "archimate.contract",
    "archimate.representation",
    "archimate.product",
    "archimate.applicationComponent",
    "archimate.applicationCollaboration",
    "archimate.applicationInterface",
    "archimate.applicationFunction",
    "archimate.applicationInteraction",
    "archimate.applicationProcess",
    "archimate.applicationEvent",
    "archimate.applicationService",
    "archimate.dataObject",
    "archimate.node",
    "archimate.device",
    "archimate.systemSoftware",
    "archimate.technologyCollaboration",
    "archimate.technologyInterface",
    "archimate.path",
    "archimate.communicationNetwork",
    "archimate.technologyFunction",
    "archimate.technologyProcess",
    "archimate.technologyInteraction",
    "archimate.technologyEvent",
    "archimate.technologyService",
    "archimate.artifact",
    "archimate.equipment",
    "archimate.facility",
    "archimate.distributionNetwork",
    "archimate.material",
    "archimate.stakeholder",
    "archimate.driver",
    "archimate.assessment",
    "archimate.goal",
    "archimate.outcome",
    "archimate.principle",
    "archimate.requirement",
    "archimate.constraint",
    "archimate.meaning",
    "archimate.value",
    "archimate.resource",
    "archimate.capability",
    "archimate.valueStream",
    "archimate.courseOfAction",
    "archimate.workPackage",
    "archimate.deliverable",
    "archimate.implementationEvent",
    "archimate.plateau",
    "archimate.gap",
    "archimate.location",
    "archimate.grouping",
    "archimate.junction",
];

const ARCHIMATE_RELATIONSHIP_TYPES: &[&str] = &[
    "archimate.composition",
    "archimate.aggregation",
    "archimate.assignment",
    "archimate.realization",
    "archimate.serving",
    "archimate.access",
    "archimate.influence",
    "archimate.triggering",
    "archimate.flow",
    "archimate.specialization",
    "archimate.association",
];

const BPMN_ELEMENT_TYPES: &[&str] = &[
    "bpmn.task",
    "bpmn.subProcess",
    "bpmn.callActivity",
    "bpmn.startEvent",
    "bpmn.endEvent",
    "bpmn.intermediateCatchEvent",
    "bpmn.intermediateThrowEvent",
    "bpmn.boundaryEvent",
    "bpmn.gatewayExclusive",
    "bpmn.gatewayParallel",
    "bpmn.gatewayInclusive",
    "bpmn.gatewayEventBased",
    "bpmn.gatewayComplex",
    "bpmn.pool",
    "bpmn.lane",
    "bpmn.dataObject",
    "bpmn.dataStore",
    "bpmn.textAnnotation",
    "bpmn.group",
    "bpmn.process",
];

const BPMN_RELATIONSHIP_TYPES: &[&str] = &[
    "bpmn.sequenceFlow",
    "bpmn.messageFlow",
    "bpmn.association",
    "bpmn.dataAssociation",
];

/// EA naming variants that do not normalize onto a catalogue entry.
const ARCHIMATE_ALIASES: &[(&str, &str)] = &[
    ("usedby", "archimate.serving"),
    ("realisation", "archimate.realization"),
    ("specialisation", "archimate.specialization"),
    ("network", "archimate.communicationNetwork"),
    ("technologynode", "archimate.node"),
    ("infrastructureservice", "archimate.technologyService"),
    ("infrastructureinterface", "archimate.technologyInterface"),
    ("infrastructurefunction", "archimate.technologyFunction"),
    ("andjunction", "archimate.junction"),
    ("orjunction", "archimate.junction"),
];

const BPMN_ALIASES: &[(&str, &str)] = &[
    ("exclusivegateway", "bpmn.gatewayExclusive"),
    ("parallelgateway", "bpmn.gatewayParallel"),
    ("inclusivegateway", "bpmn.gatewayInclusive"),
    ("eventbasedgateway", "bpmn.gatewayEventBased"),
    ("complexgateway", "bpmn.gatewayComplex"),
    ("gateway", "bpmn.gatewayExclusive"),
    ("participant", "bpmn.pool"),
    ("activity", "bpmn.task"),
    ("usertask", "bpmn.task"),
    ("servicetask", "bpmn.task"),
    ("scripttask", "bpmn.task"),
    ("manualtask", "bpmn.task"),
    ("sendtask", "bpmn.task"),
    ("receivetask", "bpmn.task"),
    ("businessruletask", "bpmn.task"),
    ("intermediateevent", "bpmn.intermediateCatchEvent"),
    ("dataobjectreference", "bpmn.dataObject"),
    ("datastorereference", "bpmn.dataStore"),
    ("datainputassociation", "bpmn.dataAssociation"),
    ("dataoutputassociation", "bpmn.dataAssociation"),
    ("businessprocess", "bpmn.process"),
];

/// Whether a profile token names an element or a relationship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Construct {
    Element,
    Relationship,
}

/// Outcome of mapping a profile tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileType {
    Element(String),
    Relationship(String),
    Unmapped,
}

struct ProfileTables {
    catalogue: FxHashMap<(Family, String), (Construct, &'static str)>,
    aliases: FxHashMap<(Family, String), (Construct, &'static str)>,
}

static PROFILE_TABLES: LazyLock<ProfileTables> = LazyLock::new(|| {
    let mut catalogue = FxHashMap::default();
    let sources: [(Family, Construct, &[&'static str]); 4] = [
        (Family::ArchiMate, Construct::Element, ARCHIMATE_ELEMENT_TYPES),
        (Family::ArchiMate, Construct::Relationship, ARCHIMATE_RELATIONSHIP_TYPES),
        (Family::Bpmn, Construct::Element, BPMN_ELEMENT_TYPES),
        (Family::Bpmn, Construct::Relationship, BPMN_RELATIONSHIP_TYPES),
    ];
    for (family, construct, types) in sources {
        for qualified in types {
            let local = qualified.split_once('.').map(|(_, l)| l).unwrap_or(*qualified);
            catalogue.insert((family, normalize_type_key(local)), (construct, *qualified));
        }
    }

    let mut aliases = FxHashMap::default();
    for (family, table) in [(Family::ArchiMate, ARCHIMATE_ALIASES), (Family::Bpmn, BPMN_ALIASES)] {
        for (alias, qualified) in table {
            aliases.insert((family, alias.to_string()), (construct_of(qualified), *qualified));
        }
    }

    ProfileTables { catalogue, aliases }
});

/// Construct of a qualified type, judged by the built-in catalogues.
pub fn construct_of(qualified: &str) -> Construct {
    let is_relationship = ARCHIMATE_RELATIONSHIP_TYPES
        .iter()
        .chain(BPMN_RELATIONSHIP_TYPES)
        .any(|t| t.eq_ignore_ascii_case(qualified))
        || qualified.starts_with("uml.")
            && UML_RELATIONSHIP_TYPES.iter().any(|(_, _, t)| *t == qualified);
    if is_relationship {
        Construct::Relationship
    } else {
        Construct::Element
    }
}

/// Lowercase ASCII alphanumerics only.
pub fn normalize_type_key(token: &str) -> String {
    token
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Normalized key of a profile tag with its family prefix and version
/// digits removed (`ArchiMate3_BusinessActor` → `businessactor`).
pub fn profile_key(family: Family, local_name: &str) -> String {
    let key = normalize_type_key(local_name);
    let stripped = key
        .strip_prefix(family.prefix())
        .map(|rest| rest.trim_start_matches(|c: char| c.is_ascii_digit()))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(&key);
    stripped.to_string()
}

/// Map a profile tag local name to a catalogue type.
///
/// Lookup order: caller-supplied aliases, the catalogue reverse index,
/// then the curated alias table.
pub fn map_profile_tag(family: Family, local_name: &str, extra_aliases: &IndexMap<String, String>) -> ProfileType {
    let key = profile_key(family, local_name);
    if key.is_empty() {
        return ProfileType::Unmapped;
    }

    let configured = extra_aliases.iter().find(|(token, _)| {
        token.as_str() == local_name || profile_key(family, token) == key
    });
    if let Some((_, qualified)) = configured {
        return match construct_of(qualified) {
            Construct::Element => ProfileType::Element(qualified.clone()),
            Construct::Relationship => ProfileType::Relationship(qualified.clone()),
        };
    }

    let tables = &*PROFILE_TABLES;
    let hit = tables
        .catalogue
        .get(&(family, key.clone()))
        .or_else(|| tables.aliases.get(&(family, key)));
    match hit {
        Some((Construct::Element, t)) => ProfileType::Element(t.to_string()),
        Some((Construct::Relationship, t)) => ProfileType::Relationship(t.to_string()),
        None => ProfileType::Unmapped,
    }
}
