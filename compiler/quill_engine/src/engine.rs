//! The `Quill` engine: parse once, render many times.

use std::rc::Rc;
use std::time::Duration;

use quill_eval::limiter::{self, Limiter};
use quill_eval::{
    drive_async, drive_sync, render_templates, Context, ContextBuilder, Emitter, EvalResult,
    TemplateRef,
};
use quill_ir::Object;

use crate::analysis;
use crate::error::{Error, ParseError};
use crate::options::{QuillOptions, RenderOptions};
use crate::parser::Parser;
use crate::registry::{TagFactory, TagRegistry};

/// Template engine: options, tag set and globals.
#[derive(Debug)]
pub struct Quill {
    options: QuillOptions,
    tags: TagRegistry,
    globals: Rc<Object>,
}

impl Default for Quill {
    fn default() -> Self {
        Self::new(QuillOptions::default())
    }
}

impl Quill {
    pub fn new(options: QuillOptions) -> Self {
        let globals = Rc::new(Object::from(options.globals.clone()));
        Quill {
            options,
            tags: TagRegistry::with_builtins(),
            globals,
        }
    }

    #[inline]
    pub fn options(&self) -> &QuillOptions {
        &self.options
    }

    /// Add or replace a tag.
    pub fn register_tag(&mut self, name: impl Into<String>, factory: TagFactory) {
        self.tags.register(name, factory);
    }

    pub fn parse(&self, source: &str) -> Result<Vec<TemplateRef>, ParseError> {
        Parser::new(&self.tags, &self.options).parse(source)
    }

    /// Root names of the data a template reads.
    pub fn global_variables(&self, source: &str) -> Result<Vec<String>, ParseError> {
        Ok(analysis::global_variables(&self.parse(source)?))
    }

    /// A fresh context over `data`, with engine options overridden by
    /// `render`.
    pub fn context(&self, data: Object, render: &RenderOptions) -> Context {
        let memory_limit = render.memory_limit.clone().unwrap_or_else(|| {
            Rc::new(match self.options.memory_limit {
                Some(units) => Limiter::memory(units),
                None => Limiter::unbounded(limiter::MEMORY),
            })
        });
        let render_limit = render.render_limit.clone().unwrap_or_else(|| {
            Rc::new(match self.options.render_limit_ms {
                Some(ms) => Limiter::render_deadline(Duration::from_millis(ms)),
                None => Limiter::unbounded(limiter::RENDER),
            })
        });
        let globals = render
            .globals
            .clone()
            .unwrap_or_else(|| Rc::clone(&self.globals));

        let mut builder = ContextBuilder::new(data)
            .globals(globals)
            .strict_variables(render.strict_variables.unwrap_or(self.options.strict_variables))
            .own_property_only(
                render
                    .own_property_only
                    .unwrap_or(self.options.own_property_only),
            )
            .sync(render.sync.unwrap_or(false))
            .memory_limit(memory_limit)
            .render_limit(render_limit);
        if let Some(registers) = &render.registers {
            builder = builder.registers(registers.clone());
        }
        builder.build()
    }

    /// Render into `emitter` with a caller-built context, driven the way
    /// the context's sync flag says.
    pub async fn render_context(
        &self,
        templates: &[TemplateRef],
        ctx: &mut Context,
        emitter: &mut Emitter,
    ) -> EvalResult<()> {
        if ctx.sync() {
            drive_sync(render_templates(templates, ctx, emitter))
        } else {
            drive_async(render_templates(templates, ctx, emitter)).await
        }
    }

    pub async fn render_with(
        &self,
        templates: &[TemplateRef],
        data: Object,
        options: RenderOptions,
    ) -> EvalResult<String> {
        let mut ctx = self.context(data, &options);
        let mut emitter = Emitter::buffer();
        self.render_context(templates, &mut ctx, &mut emitter).await?;
        Ok(emitter.into_output())
    }

    /// Render, waiting on deferred data as needed.
    pub async fn render(&self, templates: &[TemplateRef], data: Object) -> EvalResult<String> {
        self.render_with(templates, data, RenderOptions::default())
            .await
    }

    /// Render synchronously. Deferred data must already be available.
    pub fn render_sync(&self, templates: &[TemplateRef], data: Object) -> EvalResult<String> {
        self.render_sync_with(templates, data, RenderOptions::sync())
    }

    pub fn render_sync_with(
        &self,
        templates: &[TemplateRef],
        data: Object,
        options: RenderOptions,
    ) -> EvalResult<String> {
        let options = RenderOptions {
            sync: Some(true),
            ..options
        };
        drive_sync(self.render_with(templates, data, options))
    }

    pub async fn parse_and_render(&self, source: &str, data: Object) -> Result<String, Error> {
        let templates = self.parse(source)?;
        Ok(self.render(&templates, data).await?)
    }

    pub fn parse_and_render_sync(&self, source: &str, data: Object) -> Result<String, Error> {
        let templates = self.parse(source)?;
        Ok(self.render_sync(&templates, data)?)
    }
}
