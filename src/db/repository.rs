//! Database repository for CRUD operations.
//!
//! Uses prepared statements and transactions for data integrity. Writes are
//! last-write-wins: the admin surface has one or two internal editors and
//! carries no optimistic locking.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::content::{effective_page, effective_section, page_for_category, resolve_config};
use crate::errors::AppError;
use crate::models::{
    AdminSnapshot, BlogComment, BlogPost, Briefing, CreateBriefingRequest, CreateCommentRequest,
    CreateLeadRequest, CreatePostRequest, CreateServiceRequest, Lead, PostStatus, ReactionKind,
    ReactionOutcome, RevisionInfo, ServiceData, StoredSiteConfig, UpdatePostRequest,
    UpdateServiceRequest,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Get revision info.
    pub async fn get_revision_info(&self) -> Result<RevisionInfo, AppError> {
        let row = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(RevisionInfo {
            revision_id: row.get("revision_id"),
            generated_at: row.get("generated_at"),
        })
    }

    /// Increment the revision ID and return the new value.
    pub async fn increment_revision(&self) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&self.pool)
            .await?;
        self.get_revision_id().await
    }

    /// Everything the admin panel reloads after a save, in one response.
    pub async fn get_snapshot(&self) -> Result<AdminSnapshot, AppError> {
        let meta = self.get_revision_info().await?;

        let stored = match self.get_site_config().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Site config fetch failed, serving defaults: {}", e);
                None
            }
        };

        Ok(AdminSnapshot {
            generated_at: meta.generated_at,
            revision_id: meta.revision_id,
            config: resolve_config(stored),
            services: self.list_services().await?,
            posts: self.list_posts().await?,
            comments: self.list_all_comments().await?,
            leads: self.list_leads().await?,
            briefings: self.list_briefings().await?,
        })
    }

    // ==================== SITE CONFIG OPERATIONS ====================

    /// Get the stored (partial) site configuration, if any.
    ///
    /// An unreadable record is treated like an absent one so the merge
    /// resolver falls back to the defaults table.
    pub async fn get_site_config(&self) -> Result<Option<StoredSiteConfig>, AppError> {
        let row = sqlx::query("SELECT data FROM site_config WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(|row| {
            let data: String = row.get("data");
            match serde_json::from_str(&data) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Stored site config is unreadable: {}", e);
                    None
                }
            }
        }))
    }

    /// Replace the stored site configuration. Single row, id = 1.
    pub async fn upsert_site_config(&self, config: &StoredSiteConfig) -> Result<(), AppError> {
        let data = serde_json::to_string(config)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO site_config (id, data, updated_at) VALUES (1, ?, ?)
               ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at"#,
        )
        .bind(&data)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;
        Ok(())
    }

    // ==================== SERVICE OPERATIONS ====================

    /// List all service cards.
    pub async fn list_services(&self) -> Result<Vec<ServiceData>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, subtitle, description, price, category, page, section_id,
                      features, display_order, is_active, is_highlighted, badge_text,
                      extra_info, created_at, updated_at
               FROM services ORDER BY display_order, created_at"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(service_from_row).collect())
    }

    /// Get a service card by ID.
    pub async fn get_service(&self, id: &str) -> Result<Option<ServiceData>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, name, subtitle, description, price, category, page, section_id,
                      features, display_order, is_active, is_highlighted, badge_text,
                      extra_info, created_at, updated_at
               FROM services WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(service_from_row))
    }

    /// Create a new service card.
    pub async fn create_service(
        &self,
        request: &CreateServiceRequest,
    ) -> Result<ServiceData, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let features_json = serde_json::to_string(&request.features).unwrap_or_default();

        sqlx::query(
            r#"INSERT INTO services (
                id, name, subtitle, description, price, category, page, section_id,
                features, display_order, is_active, is_highlighted, badge_text,
                extra_info, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.subtitle)
        .bind(&request.description)
        .bind(&request.price)
        .bind(&request.category)
        .bind(&request.page)
        .bind(&request.section_id)
        .bind(&features_json)
        .bind(request.display_order)
        .bind(request.is_active as i32)
        .bind(request.is_highlighted as i32)
        .bind(&request.badge_text)
        .bind(&request.extra_info)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(ServiceData {
            id,
            name: request.name.clone(),
            subtitle: request.subtitle.clone(),
            description: request.description.clone(),
            price: request.price.clone(),
            category: request.category.clone(),
            page: request.page.clone(),
            section_id: request.section_id.clone(),
            features: request.features.clone(),
            display_order: request.display_order,
            is_active: request.is_active,
            is_highlighted: request.is_highlighted,
            badge_text: request.badge_text.clone(),
            extra_info: request.extra_info.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a service card. Last write wins.
    pub async fn update_service(
        &self,
        id: &str,
        request: &UpdateServiceRequest,
    ) -> Result<ServiceData, AppError> {
        let existing = self
            .get_service(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let subtitle = request.subtitle.clone().or(existing.subtitle.clone());
        let description = request.description.clone().or(existing.description.clone());
        let price = request.price.clone().or(existing.price.clone());
        let category = request.category.clone().or(existing.category.clone());
        let page = request.page.clone().or(existing.page.clone());
        let section_id = request.section_id.clone().or(existing.section_id.clone());
        let features = request.features.clone().unwrap_or(existing.features.clone());
        let display_order = request.display_order.unwrap_or(existing.display_order);
        let is_active = request.is_active.unwrap_or(existing.is_active);
        let is_highlighted = request.is_highlighted.unwrap_or(existing.is_highlighted);
        let badge_text = request.badge_text.clone().or(existing.badge_text.clone());
        let extra_info = request.extra_info.clone().or(existing.extra_info.clone());
        let features_json = serde_json::to_string(&features).unwrap_or_default();

        sqlx::query(
            r#"UPDATE services SET
                name = ?, subtitle = ?, description = ?, price = ?, category = ?,
                page = ?, section_id = ?, features = ?, display_order = ?,
                is_active = ?, is_highlighted = ?, badge_text = ?, extra_info = ?,
                updated_at = ?
            WHERE id = ?"#,
        )
        .bind(name)
        .bind(&subtitle)
        .bind(&description)
        .bind(&price)
        .bind(&category)
        .bind(&page)
        .bind(&section_id)
        .bind(&features_json)
        .bind(display_order)
        .bind(is_active as i32)
        .bind(is_highlighted as i32)
        .bind(&badge_text)
        .bind(&extra_info)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(ServiceData {
            id: id.to_string(),
            name: name.clone(),
            subtitle,
            description,
            price,
            category,
            page,
            section_id,
            features,
            display_order,
            is_active,
            is_highlighted,
            badge_text,
            extra_info,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a service card.
    pub async fn delete_service(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Service {} not found", id)));
        }

        self.increment_revision().await?;
        Ok(())
    }

    /// Insert the default service cards, skipping any card whose
    /// `(name, page, section_id)` already exists. Legacy records count: the
    /// comparison uses the same page/section fallbacks the catalog resolver
    /// applies, so running the sync twice never duplicates a card.
    /// Returns the number of cards inserted.
    pub async fn sync_default_services(
        &self,
        defaults: &[CreateServiceRequest],
    ) -> Result<usize, AppError> {
        let existing = self.list_services().await?;
        let existing_keys: Vec<(String, Option<String>, String)> = existing
            .iter()
            .map(|s| (s.name.clone(), effective_page(s), effective_section(s)))
            .collect();

        let mut inserted = 0;
        for card in defaults {
            let page = card.page.clone().or_else(|| {
                card.category
                    .as_deref()
                    .and_then(page_for_category)
                    .map(|p| p.to_string())
            });
            let key = (
                card.name.clone(),
                page,
                card.section_id
                    .clone()
                    .unwrap_or_else(|| crate::content::FALLBACK_SECTION.to_string()),
            );
            if existing_keys.contains(&key) {
                continue;
            }
            self.create_service(card).await?;
            inserted += 1;
        }

        Ok(inserted)
    }

    // ==================== BLOG POST OPERATIONS ====================

    /// List all posts, drafts included, newest first.
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, slug, content, excerpt, featured_image, category,
                      status, views, likes, dislikes, created_at, updated_at
               FROM blog_posts ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(post_from_row).collect())
    }

    /// List published posts, newest first.
    pub async fn list_published_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, slug, content, excerpt, featured_image, category,
                      status, views, likes, dislikes, created_at, updated_at
               FROM blog_posts WHERE status = 'published' ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(post_from_row).collect())
    }

    /// Get a post by ID, drafts included.
    pub async fn get_post(&self, id: &str) -> Result<Option<BlogPost>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, slug, content, excerpt, featured_image, category,
                      status, views, likes, dislikes, created_at, updated_at
               FROM blog_posts WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(post_from_row))
    }

    /// Get a published post by its exact slug. Drafts are invisible here.
    pub async fn get_published_post_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BlogPost>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, slug, content, excerpt, featured_image, category,
                      status, views, likes, dislikes, created_at, updated_at
               FROM blog_posts WHERE slug = ? AND status = 'published'"#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(post_from_row))
    }

    /// Whether a slug is already taken by another post.
    pub async fn slug_exists(&self, slug: &str, exclude_id: Option<&str>) -> Result<bool, AppError> {
        let row = match exclude_id {
            Some(id) => {
                sqlx::query("SELECT 1 AS hit FROM blog_posts WHERE slug = ? AND id != ?")
                    .bind(slug)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT 1 AS hit FROM blog_posts WHERE slug = ?")
                    .bind(slug)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        Ok(row.is_some())
    }

    /// Create a new post.
    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<BlogPost, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO blog_posts (
                id, title, slug, content, excerpt, featured_image, category,
                status, views, likes, dislikes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0, 0, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.slug)
        .bind(&request.content)
        .bind(&request.excerpt)
        .bind(&request.featured_image)
        .bind(&request.category)
        .bind(request.status.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(BlogPost {
            id,
            title: request.title.clone(),
            slug: request.slug.clone(),
            content: request.content.clone(),
            excerpt: request.excerpt.clone(),
            featured_image: request.featured_image.clone(),
            category: request.category.clone(),
            status: request.status,
            views: 0,
            likes: 0,
            dislikes: 0,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a post. Last write wins; counters are never touched here —
    /// views and reactions mutate only through their dedicated increments.
    pub async fn update_post(
        &self,
        id: &str,
        request: &UpdatePostRequest,
    ) -> Result<BlogPost, AppError> {
        let existing = self
            .get_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let title = request.title.as_ref().unwrap_or(&existing.title);
        let slug = request.slug.as_ref().unwrap_or(&existing.slug);
        let content = request.content.as_ref().unwrap_or(&existing.content);
        let excerpt = request.excerpt.clone().or(existing.excerpt.clone());
        let featured_image = request
            .featured_image
            .clone()
            .or(existing.featured_image.clone());
        let category = request.category.clone().or(existing.category.clone());
        let status = request.status.unwrap_or(existing.status);

        sqlx::query(
            r#"UPDATE blog_posts SET
                title = ?, slug = ?, content = ?, excerpt = ?, featured_image = ?,
                category = ?, status = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(title)
        .bind(slug)
        .bind(content)
        .bind(&excerpt)
        .bind(&featured_image)
        .bind(&category)
        .bind(status.as_str())
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(BlogPost {
            id: id.to_string(),
            title: title.clone(),
            slug: slug.clone(),
            content: content.clone(),
            excerpt,
            featured_image,
            category,
            status,
            views: existing.views,
            likes: existing.likes,
            dislikes: existing.dislikes,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a post together with its comments and reactions.
    pub async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Post {} not found", id)));
        }

        sqlx::query("DELETE FROM blog_comments WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM blog_reactions WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.increment_revision().await?;
        Ok(())
    }

    /// Atomically bump the view counter and return the new count.
    ///
    /// The increment happens inside the store so concurrent readers never
    /// lose updates.
    pub async fn increment_views(&self, post_id: &str) -> Result<i64, AppError> {
        let result = sqlx::query("UPDATE blog_posts SET views = views + 1 WHERE id = ?")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Post {} not found", post_id)));
        }

        let row = sqlx::query("SELECT views FROM blog_posts WHERE id = ?")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("views"))
    }

    /// Record a reaction and bump the matching counter in one transaction.
    ///
    /// At most one reaction per `(post, reader_key)`: a repeat attempt is
    /// rejected and the counters are returned unchanged.
    pub async fn add_reaction(
        &self,
        post_id: &str,
        reader_key: &str,
        kind: ReactionKind,
    ) -> Result<ReactionOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        let post = sqlx::query("SELECT likes, dislikes FROM blog_posts WHERE id = ?")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(post) = post else {
            return Err(AppError::NotFound(format!("Post {} not found", post_id)));
        };

        let already = sqlx::query(
            "SELECT 1 AS hit FROM blog_reactions WHERE post_id = ? AND reader_key = ?",
        )
        .bind(post_id)
        .bind(reader_key)
        .fetch_optional(&mut *tx)
        .await?;

        if already.is_some() {
            return Ok(ReactionOutcome {
                accepted: false,
                likes: post.get("likes"),
                dislikes: post.get("dislikes"),
            });
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO blog_reactions (post_id, reader_key, kind, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(post_id)
        .bind(reader_key)
        .bind(kind.as_str())
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let column = match kind {
            ReactionKind::Like => "likes",
            ReactionKind::Dislike => "dislikes",
        };
        sqlx::query(&format!(
            "UPDATE blog_posts SET {} = {} + 1 WHERE id = ?",
            column, column
        ))
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query("SELECT likes, dislikes FROM blog_posts WHERE id = ?")
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(ReactionOutcome {
            accepted: true,
            likes: row.get("likes"),
            dislikes: row.get("dislikes"),
        })
    }

    // ==================== COMMENT OPERATIONS ====================

    /// List the comments of one post, oldest first.
    pub async fn list_comments(&self, post_id: &str) -> Result<Vec<BlogComment>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, post_id, parent_id, author_name, content, created_at
               FROM blog_comments WHERE post_id = ? ORDER BY created_at"#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// List every comment, newest first. Admin moderation view.
    pub async fn list_all_comments(&self) -> Result<Vec<BlogComment>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, post_id, parent_id, author_name, content, created_at
               FROM blog_comments ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// Get a comment by ID.
    pub async fn get_comment(&self, id: &str) -> Result<Option<BlogComment>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, post_id, parent_id, author_name, content, created_at
               FROM blog_comments WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(comment_from_row))
    }

    /// Post a comment. One nesting level: a reply to a reply is filed under
    /// the original top-level comment.
    pub async fn create_comment(
        &self,
        post_id: &str,
        request: &CreateCommentRequest,
    ) -> Result<BlogComment, AppError> {
        let parent_id = match &request.parent_id {
            Some(parent_id) => {
                let parent = self.get_comment(parent_id).await?.ok_or_else(|| {
                    AppError::NotFound(format!("Comment {} not found", parent_id))
                })?;
                if parent.post_id != post_id {
                    return Err(AppError::Validation(
                        "Parent comment belongs to another post".to_string(),
                    ));
                }
                Some(parent.parent_id.unwrap_or(parent.id))
            }
            None => None,
        };

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO blog_comments (id, post_id, parent_id, author_name, content, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(post_id)
        .bind(&parent_id)
        .bind(&request.author_name)
        .bind(&request.content)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(BlogComment {
            id,
            post_id: post_id.to_string(),
            parent_id,
            author_name: request.author_name.clone(),
            content: request.content.clone(),
            created_at: now,
        })
    }

    /// Delete a comment and its replies.
    pub async fn delete_comment(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blog_comments WHERE id = ? OR parent_id = ?")
            .bind(id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Comment {} not found", id)));
        }

        Ok(())
    }

    // ==================== LEAD / BRIEFING OPERATIONS ====================

    /// Capture a lead. Write-once.
    pub async fn create_lead(&self, request: &CreateLeadRequest) -> Result<Lead, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let data = serde_json::to_string(&request.data)?;

        sqlx::query(
            "INSERT INTO leads (id, lead_type, plan, data, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.lead_type)
        .bind(&request.plan)
        .bind(&data)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Lead {
            id,
            lead_type: request.lead_type.clone(),
            plan: request.plan.clone(),
            data: request.data.clone(),
            created_at: now,
        })
    }

    /// List captured leads, newest first.
    pub async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        let rows = sqlx::query(
            "SELECT id, lead_type, plan, data, created_at FROM leads ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(lead_from_row).collect())
    }

    /// Capture a briefing. Write-once.
    pub async fn create_briefing(
        &self,
        request: &CreateBriefingRequest,
    ) -> Result<Briefing, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let data = serde_json::to_string(&request.data)?;

        sqlx::query("INSERT INTO briefings (id, data, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&data)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(Briefing {
            id,
            data: request.data.clone(),
            created_at: now,
        })
    }

    /// List submitted briefings, newest first.
    pub async fn list_briefings(&self) -> Result<Vec<Briefing>, AppError> {
        let rows =
            sqlx::query("SELECT id, data, created_at FROM briefings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(briefing_from_row).collect())
    }
}

// Helper functions for row conversion

fn service_from_row(row: &sqlx::sqlite::SqliteRow) -> ServiceData {
    let is_active: i32 = row.get("is_active");
    let is_highlighted: i32 = row.get("is_highlighted");
    let features_str: Option<String> = row.get("features");

    ServiceData {
        id: row.get("id"),
        name: row.get("name"),
        subtitle: row.get("subtitle"),
        description: row.get("description"),
        price: row.get("price"),
        category: row.get("category"),
        page: row.get("page"),
        section_id: row.get("section_id"),
        features: features_str
            .map(|s| parse_json_array(&s))
            .unwrap_or_default(),
        display_order: row.get("display_order"),
        is_active: is_active != 0,
        is_highlighted: is_highlighted != 0,
        badge_text: row.get("badge_text"),
        extra_info: row.get("extra_info"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn post_from_row(row: &sqlx::sqlite::SqliteRow) -> BlogPost {
    let status_str: String = row.get("status");

    BlogPost {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        content: row.get("content"),
        excerpt: row.get("excerpt"),
        featured_image: row.get("featured_image"),
        category: row.get("category"),
        status: PostStatus::from_str(&status_str).unwrap_or(PostStatus::Draft),
        views: row.get("views"),
        likes: row.get("likes"),
        dislikes: row.get("dislikes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn comment_from_row(row: &sqlx::sqlite::SqliteRow) -> BlogComment {
    BlogComment {
        id: row.get("id"),
        post_id: row.get("post_id"),
        parent_id: row.get("parent_id"),
        author_name: row.get("author_name"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    }
}

fn lead_from_row(row: &sqlx::sqlite::SqliteRow) -> Lead {
    let data_str: String = row.get("data");
    Lead {
        id: row.get("id"),
        lead_type: row.get("lead_type"),
        plan: row.get("plan"),
        data: serde_json::from_str(&data_str).unwrap_or(serde_json::Value::Null),
        created_at: row.get("created_at"),
    }
}

fn briefing_from_row(row: &sqlx::sqlite::SqliteRow) -> Briefing {
    let data_str: String = row.get("data");
    Briefing {
        id: row.get("id"),
        data: serde_json::from_str(&data_str).unwrap_or(serde_json::Value::Null),
        created_at: row.get("created_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
