//! One named method per endpoint. Each builds (or takes) the endpoint's request type
//! and goes through [`OpenAI::req`], so validation lives with the request types.

use crate::{
    endpoints::{
        audio::{Transcription, Translation, WhisperResponse},
        chat::{ChatCompletion, ChatCompletionResponse},
        completions::{Completion, CompletionResponse},
        edits::{Edit, EditResponse},
        embeddings::{Embedding, EmbeddingResponse},
        fetch_bytes,
        files::{self, DeleteFile, File, ListFiles, RetrieveFile, UploadFile, UploadFileResponse},
        fine_tunes::{
            CancelFineTune, FineTune, FineTuneEvent, FineTuneResponse, ListFineTuneEvents,
            ListFineTunes, RetrieveFineTune,
        },
        images::{ImageEdit, ImageGeneration, ImageItem, ImageResponse, ImageVariation},
        models::{
            DeleteFineTuneModel, Engine, ListEngines, ListModels, Model, RetrieveEngine,
            RetrieveModel,
        },
        moderations::{Moderation, ModerationResponse},
        DeleteResponse,
    },
    util::FileUpload,
    OpenAI, OpenAIResult,
};

impl OpenAI {
    /// Lists the models available to the account.
    pub async fn models(&self) -> OpenAIResult<Vec<Model>> {
        Ok(self.req(&ListModels).await?.data)
    }

    pub async fn model(&self, id: impl Into<String>) -> OpenAIResult<Model> {
        self.req(&RetrieveModel::new(id)).await
    }

    pub async fn completions(&self, completion: &Completion) -> OpenAIResult<CompletionResponse> {
        self.req(completion).await
    }

    /// Completes `prompt` with the default completion settings.
    pub async fn complete(&self, prompt: impl Into<String>) -> OpenAIResult<CompletionResponse> {
        self.completions(&Completion::prompt(prompt).build()).await
    }

    pub async fn chat_completion(
        &self,
        chat: &ChatCompletion<'_>,
    ) -> OpenAIResult<ChatCompletionResponse> {
        self.req(chat).await
    }

    pub async fn edit(&self, edit: &Edit) -> OpenAIResult<EditResponse> {
        self.req(edit).await
    }

    pub async fn generate_images(&self, image: &ImageGeneration) -> OpenAIResult<ImageResponse> {
        self.req(image).await
    }

    /// Generates one 512x512 image per the default settings.
    pub async fn generate_images_from_prompt(
        &self,
        prompt: impl Into<String>,
    ) -> OpenAIResult<ImageResponse> {
        self.generate_images(&ImageGeneration::prompt(prompt).build())
            .await
    }

    /// Edits an image. Returns only the generated images.
    pub async fn edit_images(&self, edit: &ImageEdit) -> OpenAIResult<Vec<ImageItem>> {
        Ok(self.req(edit).await?.data)
    }

    pub async fn image_variations(
        &self,
        variation: &ImageVariation,
    ) -> OpenAIResult<ImageResponse> {
        self.req(variation).await
    }

    pub async fn embeddings(&self, embedding: &Embedding) -> OpenAIResult<EmbeddingResponse> {
        self.req(embedding).await
    }

    /// Embeds `input` with the default embedding model.
    pub async fn embed(&self, input: impl Into<String>) -> OpenAIResult<EmbeddingResponse> {
        self.embeddings(&Embedding::input(input).build()).await
    }

    pub async fn files(&self) -> OpenAIResult<Vec<File>> {
        Ok(self.req(&ListFiles).await?.data)
    }

    pub async fn upload_file(&self, upload: &UploadFile) -> OpenAIResult<UploadFileResponse> {
        self.req(upload).await
    }

    /// Uploads `file` with the `fine-tune` purpose.
    pub async fn upload_fine_tune_file(
        &self,
        file: FileUpload,
    ) -> OpenAIResult<UploadFileResponse> {
        self.upload_file(&UploadFile::fine_tune(file)).await
    }

    pub async fn retrieve_file(&self, file_id: impl Into<String>) -> OpenAIResult<File> {
        self.req(&RetrieveFile::new(file_id)).await
    }

    pub async fn delete_file(&self, file_id: impl Into<String>) -> OpenAIResult<DeleteResponse> {
        self.req(&DeleteFile::new(file_id)).await
    }

    /// Downloads the raw contents of a file. Not available on free accounts.
    pub async fn retrieve_file_content(&self, file_id: &str) -> OpenAIResult<Vec<u8>> {
        fetch_bytes(self, &files::content_path(file_id)?).await
    }

    pub async fn moderations(&self, moderation: &Moderation) -> OpenAIResult<ModerationResponse> {
        self.req(moderation).await
    }

    /// Moderates `input` with the latest moderation model.
    pub async fn moderate(&self, input: impl Into<String>) -> OpenAIResult<ModerationResponse> {
        self.moderations(&Moderation::input(input).build()).await
    }

    pub async fn fine_tune(&self, fine_tune: &FineTune) -> OpenAIResult<FineTuneResponse> {
        self.req(fine_tune).await
    }

    /// Starts a fine-tune of the default model on an uploaded training file.
    pub async fn fine_tune_file(
        &self,
        training_file: impl Into<String>,
    ) -> OpenAIResult<FineTuneResponse> {
        self.fine_tune(&FineTune::training_file(training_file).build())
            .await
    }

    pub async fn fine_tunes(&self) -> OpenAIResult<Vec<FineTuneResponse>> {
        Ok(self.req(&ListFineTunes).await?.data)
    }

    pub async fn retrieve_fine_tune(
        &self,
        fine_tune_id: impl Into<String>,
    ) -> OpenAIResult<FineTuneResponse> {
        self.req(&RetrieveFineTune::new(fine_tune_id)).await
    }

    pub async fn cancel_fine_tune(
        &self,
        fine_tune_id: impl Into<String>,
    ) -> OpenAIResult<FineTuneResponse> {
        self.req(&CancelFineTune::new(fine_tune_id)).await
    }

    pub async fn fine_tune_events(
        &self,
        fine_tune_id: impl Into<String>,
    ) -> OpenAIResult<Vec<FineTuneEvent>> {
        Ok(self.req(&ListFineTuneEvents::new(fine_tune_id)).await?.data)
    }

    pub async fn delete_fine_tune_model(
        &self,
        model: impl Into<String>,
    ) -> OpenAIResult<DeleteResponse> {
        self.req(&DeleteFineTuneModel::new(model)).await
    }

    pub async fn transcription(
        &self,
        transcription: &Transcription,
    ) -> OpenAIResult<WhisperResponse> {
        self.req(transcription).await
    }

    pub async fn translation(&self, translation: &Translation) -> OpenAIResult<WhisperResponse> {
        self.req(translation).await
    }

    #[deprecated(note = "engines are superseded by models, use `models`")]
    pub async fn engines(&self) -> OpenAIResult<Vec<Engine>> {
        Ok(self.req(&ListEngines).await?.data)
    }

    #[deprecated(note = "engines are superseded by models, use `model`")]
    pub async fn engine(&self, engine_id: impl Into<String>) -> OpenAIResult<Engine> {
        self.req(&RetrieveEngine::new(engine_id)).await
    }
}
