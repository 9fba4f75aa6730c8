#![allow(dead_code)]

use recordkit_core::{
    types::Strings, Descriptors, FieldDef, FieldValue, Kind, Member, Record,
};
use std::sync::OnceLock;

/// Audit columns shared by every record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Base {
    pub id: i64,
    pub created_at: chrono::NaiveDateTime,
    pub deleted: bool,
}

impl Record for Base {
    fn members() -> Vec<Member> {
        vec![
            Member::Column(FieldDef::new("id", Kind::BigInt).tag("id,PRIMARY_KEY,AUTO_INCREMENT")),
            Member::Column(FieldDef::new("created_at", Kind::Timestamp).tag("created_at")),
            Member::Column(FieldDef::new("deleted", Kind::Bool).tag("deleted")),
        ]
    }

    fn descriptors() -> &'static Descriptors {
        static DESCRIPTORS: OnceLock<Descriptors> = OnceLock::new();
        DESCRIPTORS.get_or_init(|| Descriptors::extract(Self::members()))
    }

    fn field(&self, name: &str) -> Option<&dyn FieldValue> {
        match name {
            "id" => Some(&self.id),
            "created_at" => Some(&self.created_at),
            "deleted" => Some(&self.deleted),
            _ => None,
        }
    }

    fn fields_mut(&mut self) -> Vec<(&'static str, &mut dyn FieldValue)> {
        vec![
            ("id", &mut self.id),
            ("created_at", &mut self.created_at),
            ("deleted", &mut self.deleted),
        ]
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub nickname: Option<String>,
    pub tags: Strings,
    pub base: Base,
}

impl Record for Account {
    fn members() -> Vec<Member> {
        vec![
            Member::Column(FieldDef::new("name", Kind::Text).tag("name").length("50")),
            Member::Column(FieldDef::new("email", Kind::Text).tag("email,UNIQUE")),
            Member::Column(
                FieldDef::new("nickname", Kind::Text)
                    .tag("nickname,NULL")
                    .comment("display name"),
            ),
            Member::Column(FieldDef::new("tags", Kind::Sequence).tag("tags")),
            Member::Embedded(Base::members),
        ]
    }

    fn descriptors() -> &'static Descriptors {
        static DESCRIPTORS: OnceLock<Descriptors> = OnceLock::new();
        DESCRIPTORS.get_or_init(|| Descriptors::extract(Self::members()))
    }

    fn field(&self, name: &str) -> Option<&dyn FieldValue> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "nickname" => Some(&self.nickname),
            "tags" => Some(&self.tags),
            _ => self.base.field(name),
        }
    }

    fn fields_mut(&mut self) -> Vec<(&'static str, &mut dyn FieldValue)> {
        let mut fields: Vec<(&'static str, &mut dyn FieldValue)> = vec![
            ("name", &mut self.name),
            ("email", &mut self.email),
            ("nickname", &mut self.nickname),
            ("tags", &mut self.tags),
        ];
        fields.extend(self.base.fields_mut());
        fields
    }
}

/// A record keyed by two natural columns and no auto-increment.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Membership {
    pub team: String,
    pub member: i32,
    pub role: String,
}

impl Record for Membership {
    fn members() -> Vec<Member> {
        vec![
            Member::Column(FieldDef::new("team", Kind::Text).tag("team,PRIMARY_KEY")),
            Member::Column(FieldDef::new("member", Kind::Int).tag("member_id,PRIMARY KEY")),
            Member::Column(FieldDef::new("role", Kind::Text)),
        ]
    }

    fn descriptors() -> &'static Descriptors {
        static DESCRIPTORS: OnceLock<Descriptors> = OnceLock::new();
        DESCRIPTORS.get_or_init(|| Descriptors::extract(Self::members()))
    }

    fn field(&self, name: &str) -> Option<&dyn FieldValue> {
        match name {
            "team" => Some(&self.team),
            "member" => Some(&self.member),
            "role" => Some(&self.role),
            _ => None,
        }
    }

    fn fields_mut(&mut self) -> Vec<(&'static str, &mut dyn FieldValue)> {
        vec![
            ("team", &mut self.team),
            ("member", &mut self.member),
            ("role", &mut self.role),
        ]
    }
}
