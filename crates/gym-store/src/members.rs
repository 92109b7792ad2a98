use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use gym_domain::{
    membership_id, Context, Id, Insert, Member, MemberDraft, MemberFilter, MemberPatch, Query,
    Update,
};

use crate::{results::StoreError, Connection};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;

    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let members: Vec<Member> = self.list().await;
        Ok(members.into_iter().filter(|m| filter.accepts(m)).collect())
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    type Draft = MemberDraft;

    /// Create an unpaid member. The expiry is counted from now even
    /// though nothing is paid yet.
    async fn insert(&self, ctx: &Context, draft: MemberDraft) -> Result<Member> {
        let mut conn = self.lock().await;
        let mut members: Vec<Member> = conn.load().await;

        let mut id = conn.next_id(&ctx.now);
        while members.iter().any(|m| m.membership_id == membership_id(id)) {
            id = conn.next_id(&ctx.now);
        }
        let expiry_date = draft
            .plan
            .expiry_from(ctx.now)
            .ok_or(StoreError::DateOutOfRange)?;

        let member = Member {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            plan: draft.plan,
            paid: false,
            join_date: ctx.now,
            last_payment: None,
            membership_id: membership_id(id),
            expiry_date,
            address: draft.address.unwrap_or_default(),
            emergency_contact: draft.emergency_contact.unwrap_or_default(),
        };
        members.push(member.clone());
        conn.store(&members).await?;

        info!(id, membership_id = %member.membership_id, "added member");
        Ok(member)
    }
}

#[async_trait]
impl Update<Member> for Connection {
    type Patch = MemberPatch;

    async fn update(&self, id: Id, patch: MemberPatch) -> Result<Member> {
        let mut conn = self.lock().await;
        let mut members: Vec<Member> = conn.load().await;
        let member = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound {
                collection: "members",
                id,
            })?;
        patch.apply(member);
        let member = member.clone();
        conn.store(&members).await?;
        Ok(member)
    }
}

impl Connection {
    /// Flip the paid flag. Becoming paid stamps the payment time and
    /// restarts the membership window at now, dropping any time left
    /// on the old one. Becoming unpaid changes nothing else.
    pub async fn toggle_payment(&self, ctx: &Context, id: Id) -> Result<Member> {
        let mut conn = self.lock().await;
        let mut members: Vec<Member> = conn.load().await;
        let member = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound {
                collection: "members",
                id,
            })?;

        member.paid = !member.paid;
        if member.paid {
            member.expiry_date = member
                .plan
                .expiry_from(ctx.now)
                .ok_or(StoreError::DateOutOfRange)?;
            member.last_payment = Some(ctx.now);
        }
        let member = member.clone();
        conn.store(&members).await?;

        info!(id, paid = member.paid, "toggled payment");
        Ok(member)
    }
}
