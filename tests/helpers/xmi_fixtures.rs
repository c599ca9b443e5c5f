//! Common XMI fixtures for tests.

#![allow(dead_code)]

// Elements without identifiers in two families
pub const MISSING_IDS: &str = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001"
    xmlns:ArchiMate3="http://www.sparxsystems.com/profiles/ArchiMate3/1.0">
  <uml:Model xmi:type="uml:Model" xmi:id="M">
    <packagedElement xmi:type="uml:Class" name="Anonymous"/>
    <packagedElement xmi:type="uml:Class" xmi:id="C1" name="Named"/>
  </uml:Model>
  <ArchiMate3:ArchiMate_BusinessActor name="Clerk"/>
  <ArchiMate3:ArchiMate_BusinessRole name="Teller"/>
  <ArchiMate3:ArchiMate_BusinessActor xmi:id="ACT" name="Manager"/>
</xmi:XMI>"#;

// Multi-valued endpoints and id-less profile relationships
pub const FAN_OUT: &str = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001"
    xmlns:ArchiMate3="http://www.sparxsystems.com/profiles/ArchiMate3/1.0">
  <uml:Model xmi:type="uml:Model" xmi:id="M">
    <packagedElement xmi:type="uml:Dependency" xmi:id="D1" client="A B" supplier="C D E"/>
    <packagedElement xmi:type="uml:Dependency" xmi:id="D2" client="A" supplier="C"/>
    <packagedElement xmi:type="uml:Dependency" xmi:id="D3" client="A"/>
  </uml:Model>
  <ArchiMate3:ArchiMate_Flow source="A" target="B"/>
  <ArchiMate3:ArchiMate_Flow source="A" target="B"/>
  <ArchiMate3:ArchiMate_Flow source="A" target="C"/>
</xmi:XMI>"#;

// Stereotyped dependencies between use cases
pub const USE_CASE_DEPENDENCIES: &str = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001">
  <uml:Model xmi:type="uml:Model" xmi:id="M">
    <packagedElement xmi:type="uml:UseCase" xmi:id="UC1" name="Checkout">
      <include xmi:type="uml:Include" xmi:id="I1" addition="UC3"/>
    </packagedElement>
    <packagedElement xmi:type="uml:UseCase" xmi:id="UC2" name="Pay"/>
    <packagedElement xmi:type="uml:UseCase" xmi:id="UC3" name="Login"/>
    <packagedElement xmi:type="uml:Dependency" xmi:id="DI" client="UC1" supplier="UC2" stereotype="InClUdE"/>
    <packagedElement xmi:type="uml:Dependency" xmi:id="DE" client="UC3" supplier="UC1"/>
    <packagedElement xmi:type="uml:Dependency" xmi:id="DP" client="UC1" supplier="UC3"/>
  </uml:Model>
  <xmi:Extension extender="Enterprise Architect" extenderID="6.5">
    <connectors>
      <connector xmi:idref="DE">
        <properties ea_type="Dependency" stereotype="extend"/>
      </connector>
    </connectors>
  </xmi:Extension>
</xmi:XMI>"#;

// A class with typed attributes and operations
pub const CLASS_MEMBERS: &str = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001">
  <uml:Model xmi:type="uml:Model" xmi:id="M">
    <packagedElement xmi:type="uml:Class" xmi:id="ORDER" name="Order">
      <ownedAttribute xmi:type="uml:Property" xmi:id="P1" name="lines" type="LINE">
        <lowerValue xmi:type="uml:LiteralInteger" value="0"/>
        <upperValue xmi:type="uml:LiteralUnlimitedNatural" value="-1"/>
      </ownedAttribute>
      <ownedAttribute xmi:type="uml:Property" xmi:id="P2" name="self" type="uml:Property"/>
      <ownedAttribute xmi:type="uml:Property" xmi:id="P3" name="total">
        <type href="http://www.omg.org/spec/UML/20131001/PrimitiveTypes.xmi#Real"/>
      </ownedAttribute>
      <ownedAttribute xmi:type="uml:Property" xmi:id="P4" name="firstLine" type="uml:Property">
        <type xmi:idref="LINE"/>
      </ownedAttribute>
      <ownedOperation xmi:id="O1" name="addLine" visibility="public">
        <ownedParameter xmi:id="O1R" direction="return" type="EAJava_boolean"/>
        <ownedParameter xmi:id="O1P" name="line" type="LINE"/>
      </ownedOperation>
    </packagedElement>
    <packagedElement xmi:type="uml:Class" xmi:id="LINE" name="OrderLine"/>
  </uml:Model>
</xmi:XMI>"#;

// An association class between two classes
pub const ASSOCIATION_CLASS: &str = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001">
  <uml:Model xmi:type="uml:Model" xmi:id="M">
    <packagedElement xmi:type="uml:Class" xmi:id="STUDENT" name="Student"/>
    <packagedElement xmi:type="uml:Class" xmi:id="COURSE" name="Course"/>
    <packagedElement xmi:type="uml:AssociationClass" xmi:id="ENROLMENT" name="Enrolment">
      <memberEnd xmi:idref="EAID_srcENR"/>
      <memberEnd xmi:idref="EAID_dstENR"/>
      <ownedEnd xmi:type="uml:Property" xmi:id="EAID_srcENR" type="STUDENT"/>
      <ownedEnd xmi:type="uml:Property" xmi:id="EAID_dstENR" type="COURSE">
        <upperValue xmi:type="uml:LiteralUnlimitedNatural" value="-1"/>
      </ownedEnd>
    </packagedElement>
  </uml:Model>
</xmi:XMI>"#;

// A package known as EAPK_SALES in XMI and EAID_SALES in the repository
pub const PACKAGE_ALIASES: &str = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001">
  <uml:Model xmi:type="uml:Model" xmi:id="EAPK_ROOT" name="Model">
    <packagedElement xmi:type="uml:Package" xmi:id="EAPK_SALES" name="Sales">
      <packagedElement xmi:type="uml:Class" xmi:id="EAID_ORDER" name="Order"/>
      <packagedElement xmi:type="uml:Dependency" xmi:id="EAID_DEP" client="EAID_ORDER" supplier="EAID_SALES"/>
    </packagedElement>
  </uml:Model>
  <xmi:Extension extender="Enterprise Architect" extenderID="6.5">
    <elements>
      <element xmi:idref="EAPK_SALES" xmi:type="uml:Package" name="Sales">
        <model package2="EAID_SALES" package="EAPK_ROOT" ea_eleType="package"/>
      </element>
      <element xmi:idref="EAID_ORDER" xmi:type="uml:Class" name="Order">
        <model package="EAPK_SALES" ea_eleType="element"/>
      </element>
    </elements>
  </xmi:Extension>
</xmi:XMI>"#;

// ArchiMate and BPMN stereotype applications over plain UML records
pub const PROFILES: &str = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001"
    xmlns:ArchiMate3="http://www.sparxsystems.com/profiles/ArchiMate3/1.0"
    xmlns:BPMN2.0="http://www.sparxsystems.com/profiles/BPMN2.0/1.0">
  <uml:Model xmi:type="uml:Model" xmi:id="M">
    <packagedElement xmi:type="uml:Package" xmi:id="EAPK_ARCH" name="Architecture">
      <packagedElement xmi:type="uml:Component" xmi:id="APP" name="Billing">
        <ownedComment xmi:type="uml:Comment" body="Invoices customers"/>
      </packagedElement>
      <packagedElement xmi:type="uml:Class" xmi:id="ACTOR" name="Customer"/>
      <packagedElement xmi:type="uml:Dependency" xmi:id="SERVES" client="APP" supplier="ACTOR"/>
      <packagedElement xmi:type="uml:Activity" xmi:id="TASK" name="Send invoice"/>
      <packagedElement xmi:type="uml:Activity" xmi:id="GW" name="Paid?"/>
      <packagedElement xmi:type="uml:ControlFlow" xmi:id="SF" source="TASK" target="GW" name="next">
        <guard xmi:type="uml:OpaqueExpression" body="invoice sent"/>
      </packagedElement>
    </packagedElement>
  </uml:Model>
  <ArchiMate3:ArchiMate_ApplicationComponent base_Component="APP" lifecycle="production"/>
  <ArchiMate3:ArchiMate_BusinessActor base_Class="ACTOR"/>
  <ArchiMate3:ArchiMate_Serving base_Dependency="SERVES"/>
  <ArchiMate3:ArchiMate_Gizmo base_Class="MISSING"/>
  <BPMN2.0:Activity base_Activity="TASK" activityType="Task" taskType="Send"/>
  <BPMN2.0:Gateway base_Activity="GW" gatewayType="Exclusive"/>
  <BPMN2.0:SequenceFlow base_ControlFlow="SF"/>
</xmi:XMI>"#;

// Alternate endpoint and guard spellings, plus unmapped tags over relationship bases
pub const RELATIONSHIP_FORMS: &str = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/spec/XMI/20131001" xmlns:uml="http://www.omg.org/spec/UML/20131001"
    xmlns:ArchiMate3="http://www.sparxsystems.com/profiles/ArchiMate3/1.0"
    xmlns:BPMN2.0="http://www.sparxsystems.com/profiles/BPMN2.0/1.0">
  <uml:Model xmi:type="uml:Model" xmi:id="M">
    <packagedElement xmi:type="uml:Class" xmi:id="SHAPE" name="Shape">
      <interfaceRealization xmi:type="uml:InterfaceRealization" xmi:id="IR1" implementingClassifier="SHAPE" contract="DRAWABLE"/>
    </packagedElement>
    <packagedElement xmi:type="uml:Class" xmi:id="CIRCLE" name="Circle">
      <generalization xmi:type="uml:Generalization" xmi:id="G1">
        <general xmi:idref="SHAPE"/>
      </generalization>
    </packagedElement>
    <packagedElement xmi:type="uml:Interface" xmi:id="DRAWABLE" name="Drawable"/>
    <packagedElement xmi:type="uml:Activity" xmi:id="DRAW" name="Draw">
      <node xmi:type="uml:OpaqueAction" xmi:id="MEASURE" name="Measure"/>
      <node xmi:type="uml:OpaqueAction" xmi:id="RENDER" name="Render"/>
      <edge xmi:type="uml:ControlFlow" xmi:id="CF1" source="MEASURE" target="RENDER">
        <guard xmi:type="uml:OpaqueExpression"><specification body="size &gt; 0"/></guard>
      </edge>
    </packagedElement>
    <packagedElement xmi:type="uml:StateMachine" xmi:id="LIFE" name="Life">
      <region xmi:type="uml:Region" xmi:id="RG">
        <subvertex xmi:type="uml:State" xmi:id="IDLE" name="Idle"/>
        <subvertex xmi:type="uml:State" xmi:id="BUSY" name="Busy"/>
        <transition xmi:type="uml:Transition" xmi:id="T1" source="IDLE" target="BUSY"/>
      </region>
    </packagedElement>
    <packagedElement xmi:type="uml:Dependency" client="SHAPE"/>
  </uml:Model>
  <BPMN2.0:Choreography base_Transition="T1"/>
  <ArchiMate3:ArchiMate_Mystery base_InterfaceRealization="IR1"/>
</xmi:XMI>"#;
